use crate::Result;

/// A value owned by someone else, together with a way to ask the owner to
/// change it.
///
/// Components only ever read the current value and hand new values to
/// [`Binding::request_change`]; they never keep a copy of their own.
pub trait Binding<T> {
    fn value(&self) -> &T;

    fn request_change(&mut self, new_value: T) -> Result<()>;
}

/// Binding where the owner is notified through a callback.
pub struct CallbackBinding<T, F> {
    value: T,
    on_change: F,
}

impl<T, F> CallbackBinding<T, F>
where
    T: Clone,
    F: FnMut(T) -> Result<()>,
{
    pub fn new(value: T, on_change: F) -> Self {
        Self { value, on_change }
    }
}

impl<T, F> Binding<T> for CallbackBinding<T, F>
where
    T: Clone,
    F: FnMut(T) -> Result<()>,
{
    fn value(&self) -> &T {
        &self.value
    }

    fn request_change(&mut self, new_value: T) -> Result<()> {
        (self.on_change)(new_value.clone())?;
        self.value = new_value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn change_is_reported_to_owner() {
        let requested = RefCell::new(Vec::new());
        let mut binding = CallbackBinding::new(String::from("tok"), |q| {
            requested.borrow_mut().push(q);
            Ok(())
        });

        binding.request_change("pos=\"NN\"".to_string()).unwrap();
        assert_eq!("pos=\"NN\"", binding.value());
        assert_eq!(vec!["pos=\"NN\"".to_string()], *requested.borrow());
    }

    #[test]
    fn rejected_change_keeps_value() {
        let mut binding = CallbackBinding::new(String::from("tok"), |_| {
            Err(crate::errors::AppError::CorpusIndexOutOfRange { index: 0, len: 0 })
        });

        assert!(binding.request_change("lemma".to_string()).is_err());
        assert_eq!("tok", binding.value());
    }
}
