/// Receives events from a driver and optionally steers it.
///
/// Drivers call [`Observer::observe`] after each evaluation. Returning
/// `Some(action)` asks the driver to act on it (for example, to stop early);
/// returning `None` lets it continue.
///
/// Implemented for `()` (ignores every event) and for any
/// `FnMut(&E) -> Option<A>` closure.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
    }

    fn drive<O: Observer<u32, Action>>(mut observer: O, events: &[u32]) -> usize {
        for (seen, event) in events.iter().enumerate() {
            if let Some(Action::Stop) = observer.observe(event) {
                return seen + 1;
            }
        }
        events.len()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), &[1, 2, 3]), 3);
    }

    #[test]
    fn closure_observer_can_stop() {
        let mut count = 0;
        let seen = drive(
            |event: &u32| {
                count += 1;
                (*event == 2).then_some(Action::Stop)
            },
            &[1, 2, 3],
        );
        assert_eq!(seen, 2);
        assert_eq!(count, 2);
    }
}
