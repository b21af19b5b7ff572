use std::iter::FusedIterator;

use uom::si::f64::Time;

use crate::{Model, Snapshot};

/// Trait for stepping a [`Model`] through time.
///
/// A `Simulation` advances a model by computing its next input with
/// [`advance_time`] and then calling the model to produce a new [`Snapshot`]
/// describing the system at the corresponding future moment.
///
/// # Stepping Methods
///
/// After implementing [`advance_time`], the following methods are available:
///
/// - [`Simulation::step`]: Takes a single step from an initial input.
/// - [`Simulation::step_from_snapshot`]: Takes a single step from a known snapshot.
/// - [`Simulation::step_many`]: Takes multiple steps and collects every snapshot.
/// - [`Simulation::step_iter`]: Returns a lazy iterator over snapshots.
///
/// [`advance_time`]: Simulation::advance_time
pub trait Simulation: Sized {
    /// The [`Model`] being simulated.
    type Model: Model;

    /// The error type returned if a simulation step fails.
    type StepError: std::error::Error + From<<Self::Model as Model>::Error> + Send + Sync + 'static;

    /// Provides a reference to the model being simulated.
    fn model(&self) -> &Self::Model;

    /// Computes the next model input from the current snapshot.
    ///
    /// This is the customization point for integrating state, applying
    /// control logic, or reacting to external events.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`](Simulation::StepError) if computing the next input fails.
    fn advance_time(
        &self,
        snapshot: &SnapshotOf<Self>,
        dt: Time,
    ) -> Result<<Self::Model as Model>::Input, Self::StepError>;

    /// Advances the simulation by one step, starting from an initial input.
    ///
    /// The model is called twice: once to complete the initial snapshot and
    /// once after advancing.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`](Simulation::StepError) if computing the next
    /// input or calling the model fails.
    fn step(
        &self,
        input: <Self::Model as Model>::Input,
        dt: Time,
    ) -> Result<SnapshotOf<Self>, Self::StepError> {
        let output = self.model().call(&input)?;
        let snapshot = Snapshot::new(input, output);

        self.step_from_snapshot(&snapshot, dt)
    }

    /// Advances the simulation by one step from a known [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`](Simulation::StepError) if computing the next
    /// input or calling the model fails.
    fn step_from_snapshot(
        &self,
        snapshot: &SnapshotOf<Self>,
        dt: Time,
    ) -> Result<SnapshotOf<Self>, Self::StepError> {
        let input = self.advance_time(snapshot, dt)?;
        let output = self.model().call(&input)?;

        Ok(Snapshot::new(input, output))
    }

    /// Creates an iterator that advances the simulation repeatedly.
    ///
    /// The first item is the snapshot for `initial_input` itself.
    /// Each following item is one step of `dt` further along.
    /// If a step fails, the error is yielded and iteration stops.
    fn step_iter(
        &self,
        initial_input: <Self::Model as Model>::Input,
        dt: Time,
    ) -> impl Iterator<Item = Result<SnapshotOf<Self>, Self::StepError>>
    where
        <Self::Model as Model>::Input: Clone,
        <Self::Model as Model>::Output: Clone,
    {
        StepIter {
            dt,
            known: Some(Known::Input(initial_input)),
            sim: self,
        }
    }

    /// Runs the simulation for a fixed number of steps and collects the results.
    ///
    /// Returns `steps + 1` snapshots, including the initial one.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`](Simulation::StepError) if any step fails.
    /// No further steps are taken after an error.
    fn step_many(
        &self,
        initial_input: <Self::Model as Model>::Input,
        steps: usize,
        dt: Time,
    ) -> Result<Vec<SnapshotOf<Self>>, Self::StepError>
    where
        <Self::Model as Model>::Input: Clone,
        <Self::Model as Model>::Output: Clone,
    {
        self.step_iter(initial_input, dt).take(steps + 1).collect()
    }
}

/// The snapshot type produced by a [`Simulation`].
pub type SnapshotOf<S> = Snapshot<
    <<S as Simulation>::Model as Model>::Input,
    <<S as Simulation>::Model as Model>::Output,
>;

struct StepIter<'a, S: Simulation> {
    dt: Time,
    known: Option<Known<S>>,
    sim: &'a S,
}

enum Known<S: Simulation> {
    /// Only the initial input is known.
    Input(<S::Model as Model>::Input),
    /// A full snapshot is available.
    Snapshot(SnapshotOf<S>),
}

impl<S> Iterator for StepIter<'_, S>
where
    S: Simulation,
    <S::Model as Model>::Input: Clone,
    <S::Model as Model>::Output: Clone,
{
    type Item = Result<SnapshotOf<S>, S::StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        let known = self.known.take()?;

        let result = match known {
            Known::Snapshot(snapshot) => self.sim.step_from_snapshot(&snapshot, self.dt),
            Known::Input(input) => self
                .sim
                .model()
                .call(&input)
                .map(|output| Snapshot::new(input, output))
                .map_err(Into::into),
        };

        if let Ok(snapshot) = &result {
            self.known = Some(Known::Snapshot(snapshot.clone()));
        }

        Some(result)
    }
}

impl<S> FusedIterator for StepIter<'_, S>
where
    S: Simulation,
    <S::Model as Model>::Input: Clone,
    <S::Model as Model>::Output: Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;
    use uom::si::time::second;

    /// A point moving along a line at constant velocity.
    #[derive(Debug)]
    struct MovingPoint {
        velocity: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct PointInput {
        time: f64,
        position: f64,
    }

    impl Model for MovingPoint {
        type Input = PointInput;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, _input: &Self::Input) -> Result<Self::Output, Self::Error> {
            Ok(self.velocity)
        }
    }

    #[derive(Debug)]
    struct PointSimulation {
        model: MovingPoint,
    }

    impl Simulation for PointSimulation {
        type Model = MovingPoint;
        type StepError = Infallible;

        fn model(&self) -> &Self::Model {
            &self.model
        }

        fn advance_time(
            &self,
            snapshot: &SnapshotOf<Self>,
            dt: Time,
        ) -> Result<PointInput, Self::StepError> {
            let dt = dt.get::<second>();
            Ok(PointInput {
                time: snapshot.input.time + dt,
                position: snapshot.input.position + snapshot.output * dt,
            })
        }
    }

    #[test]
    fn step_many_includes_initial_snapshot() {
        let sim = PointSimulation {
            model: MovingPoint { velocity: 2.0 },
        };
        let initial = PointInput {
            time: 0.0,
            position: 10.0,
        };

        let snapshots = sim
            .step_many(initial, 3, Time::new::<second>(0.5))
            .unwrap();

        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0].input, initial);

        let last = snapshots.last().unwrap().input;
        assert_relative_eq!(last.time, 1.5);
        assert_relative_eq!(last.position, 13.0);
    }

    #[test]
    fn single_step_matches_iterator() {
        let sim = PointSimulation {
            model: MovingPoint { velocity: -1.0 },
        };
        let initial = PointInput {
            time: 2.0,
            position: 0.0,
        };
        let dt = Time::new::<second>(0.25);

        let stepped = sim.step(initial, dt).unwrap();
        let iterated = sim.step_iter(initial, dt).nth(1).unwrap().unwrap();

        assert_eq!(stepped, iterated);
    }

    /// A model that fails once its input exceeds a maximum.
    #[derive(Debug)]
    struct Bounded {
        max_value: usize,
    }

    #[derive(Debug, Error)]
    #[error("{0} is bigger than max value of {1}")]
    struct BoundedError(usize, usize);

    impl Model for Bounded {
        type Input = usize;
        type Output = ();
        type Error = BoundedError;

        fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
            if *input <= self.max_value {
                Ok(())
            } else {
                Err(BoundedError(*input, self.max_value))
            }
        }
    }

    struct Counter {
        model: Bounded,
    }

    impl Simulation for Counter {
        type Model = Bounded;
        type StepError = BoundedError;

        fn model(&self) -> &Self::Model {
            &self.model
        }

        fn advance_time(
            &self,
            snapshot: &SnapshotOf<Self>,
            _dt: Time,
        ) -> Result<usize, Self::StepError> {
            Ok(snapshot.input + 1)
        }
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let sim = Counter {
            model: Bounded { max_value: 2 },
        };

        let results: Vec<_> = sim.step_iter(0, Time::new::<second>(1.0)).collect();

        assert_eq!(results.len(), 4);
        assert!(results[..3].iter().all(Result::is_ok));
        assert!(matches!(results[3], Err(BoundedError(3, 2))));
    }

    #[test]
    fn step_many_propagates_errors() {
        let sim = Counter {
            model: Bounded { max_value: 1 },
        };

        let error = sim.step_many(0, 5, Time::new::<second>(1.0)).unwrap_err();
        assert_eq!(error.to_string(), "2 is bigger than max value of 1");
    }
}
