//! Observer trait and the recording observer used by `record()`

use crate::error::RxError;

/// Receives the signals of an Observable
pub trait Observer<T>: Send {
    fn on_next(&mut self, value: T);
    fn on_error(&mut self, error: RxError);
    fn on_complete(&mut self);
}

/// Observer built from three closures
pub(crate) struct CallbackObserver<N, E, C> {
    next: N,
    error: E,
    complete: C,
}

impl<N, E, C> CallbackObserver<N, E, C> {
    pub(crate) fn new(next: N, error: E, complete: C) -> Self {
        Self {
            next,
            error,
            complete,
        }
    }
}

impl<T, N, E, C> Observer<T> for CallbackObserver<N, E, C>
where
    N: FnMut(T) + Send,
    E: FnMut(RxError) + Send,
    C: FnMut() + Send,
{
    fn on_next(&mut self, value: T) {
        (self.next)(value)
    }

    fn on_error(&mut self, error: RxError) {
        (self.error)(error)
    }

    fn on_complete(&mut self) {
        (self.complete)()
    }
}

/// How a recorded pipeline ended
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    /// A Single or Maybe delivered its value
    Success,
    Complete,
    Error(RxError),
}

/// Values and terminal signal captured from one run of a pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<T> {
    pub values: Vec<T>,
    pub terminal: Terminal,
}

impl<T> Recorded<T> {
    pub(crate) fn success(value: T) -> Self {
        Self {
            values: vec![value],
            terminal: Terminal::Success,
        }
    }

    pub(crate) fn complete(values: Vec<T>) -> Self {
        Self {
            values,
            terminal: Terminal::Complete,
        }
    }

    pub(crate) fn error(values: Vec<T>, error: RxError) -> Self {
        Self {
            values,
            terminal: Terminal::Error(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.terminal == Terminal::Complete
    }

    pub fn is_success(&self) -> bool {
        self.terminal == Terminal::Success
    }

    pub fn error_signal(&self) -> Option<&RxError> {
        match &self.terminal {
            Terminal::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Observer that accumulates signals into a [`Recorded`]
pub(crate) struct Recorder<T> {
    values: Vec<T>,
    terminal: Option<Terminal>,
}

impl<T> Recorder<T> {
    pub(crate) fn new() -> Self {
        Self {
            values: Vec::new(),
            terminal: None,
        }
    }

    /// A recorder that never saw a terminal signal was cut off, which only
    /// happens on cancellation; treat it as completion.
    pub(crate) fn finish(self) -> Recorded<T> {
        Recorded {
            values: self.values,
            terminal: self.terminal.unwrap_or(Terminal::Complete),
        }
    }
}

impl<T: Send> Observer<T> for Recorder<T> {
    fn on_next(&mut self, value: T) {
        self.values.push(value);
    }

    fn on_error(&mut self, error: RxError) {
        self.terminal = Some(Terminal::Error(error));
    }

    fn on_complete(&mut self) {
        self.terminal = Some(Terminal::Complete);
    }
}
