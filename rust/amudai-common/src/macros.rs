//! Early-return helpers for cursor implementations.

/// Returns `Err(InvalidArgument)` from the enclosing function unless `$cond`
/// holds. `$name` names the offending argument; the condition text becomes the
/// message.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                stringify!($cond),
            ));
        }
    };
}

/// Returns `Err(InvalidPostings)` from the enclosing function unless `$cond`
/// holds for a value reported by a posting source.
#[macro_export]
macro_rules! verify_data {
    ($name:ident, $cond:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid_postings(
                stringify!($name),
                stringify!($cond),
            ));
        }
    };
}

/// Unwraps a `Result` inside `Iterator::next` of an iterator yielding
/// `Result` items, turning an error into the iterator's `Some(Err(_))`.
#[macro_export]
macro_rules! try_next {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Result, error::Error, error::ErrorKind};

    fn check_arg(target: u32, doc: u32) -> Result<u32> {
        verify_arg!(target, target > doc);
        Ok(target)
    }

    fn check_data(freq: u32) -> Result<u32> {
        verify_data!(freq, freq >= 1);
        Ok(freq)
    }

    #[test]
    fn test_verify_arg() {
        assert_eq!(check_arg(5, 3).unwrap(), 5);
        match check_arg(3, 3).unwrap_err().kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "target");
                assert_eq!(message, "target > doc");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_verify_data() {
        assert_eq!(check_data(2).unwrap(), 2);
        let err = check_data(0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidPostings { .. }));
    }

    struct Countdown(u32);

    impl Countdown {
        fn step(&mut self) -> Result<u32> {
            if self.0 == 0 {
                return Err(Error::invalid_operation("step past zero"));
            }
            self.0 -= 1;
            Ok(self.0)
        }
    }

    impl Iterator for Countdown {
        type Item = Result<u32>;

        fn next(&mut self) -> Option<Self::Item> {
            Some(Ok(try_next!(self.step())))
        }
    }

    #[test]
    fn test_try_next() {
        let mut it = Countdown(2);
        assert_eq!(it.next().unwrap().unwrap(), 1);
        assert_eq!(it.next().unwrap().unwrap(), 0);
        assert!(it.next().unwrap().is_err());
    }
}
