//! Single-shot asynchronous results.
//!
//! A [`Completion`] is the receiving half of a one-shot channel and a
//! [`Promise`] the sending half. Functions wrapped by `#[future_wrapper]`
//! run the original function, settle the promise with its outcome and hand
//! back the completion.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;
use thiserror::Error;

/// Why a [`Completion`] resolved without a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    #[error("{0}")]
    Rejected(E),
    #[error("promise dropped before it was settled")]
    Abandoned,
}

impl<E> Failure<E> {
    pub fn rejected(self) -> Option<E> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Abandoned => None,
        }
    }
}

/// Anything that can be viewed as a `Result`.
///
/// Wrappers of functions returning `io::Result<T>` or another alias name
/// their completion's types through this trait instead of spelling out the
/// alias' error type.
pub trait Outcome {
    type Value;
    type Error;

    fn into_result(self) -> Result<Self::Value, Self::Error>;
}

impl<T, E> Outcome for Result<T, E> {
    type Value = T;
    type Error = E;

    fn into_result(self) -> Result<T, E> {
        self
    }
}

/// The sending half; settling consumes it.
#[derive(Debug)]
pub struct Promise<T, E> {
    sender: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Promise<T, E> {
    pub fn fulfill(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: E) {
        self.settle(Err(error));
    }

    pub fn settle(self, result: Result<T, E>) {
        // Nobody waiting is not an error for the producer
        let _ = self.sender.send(result);
    }
}

/// A future resolving once its [`Promise`] is settled.
#[derive(Debug)]
#[must_use = "a completion does nothing unless awaited or inspected"]
pub struct Completion<T, E> {
    receiver: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> Completion<T, E> {
    /// Creates a completion and hands its promise to `producer` right away.
    pub fn new(producer: impl FnOnce(Promise<T, E>)) -> Self {
        let (sender, receiver) = oneshot::channel();
        producer(Promise { sender });
        Self { receiver }
    }

    pub fn ready(result: Result<T, E>) -> Self {
        Self::new(|promise| promise.settle(result))
    }

    /// The result if the promise has been settled (or dropped) already.
    pub fn try_take(&mut self) -> Option<Result<T, Failure<E>>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result.map_err(Failure::Rejected)),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(Failure::Abandoned)),
        }
    }

    /// Blocks the current thread until the completion resolves.
    pub fn wait(self) -> Result<T, Failure<E>> {
        futures::executor::block_on(self)
    }

    /// Blocks until resolved, then passes the result to `callback`.
    pub fn on_complete<F>(self, callback: F)
    where
        F: FnOnce(Result<T, Failure<E>>),
    {
        callback(self.wait());
    }
}

impl<T, E> Future for Completion<T, E> {
    type Output = Result<T, Failure<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result.map_err(Failure::Rejected)),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(Failure::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::convert::Infallible;

    #[test]
    fn test_fulfilled() {
        let completion: Completion<u8, Infallible> = Completion::new(|promise| promise.fulfill(7));
        assert_eq!(block_on(completion), Ok(7));
    }

    #[test]
    fn test_rejected() {
        let completion: Completion<u8, &str> = Completion::new(|promise| promise.reject("boom"));
        let failure = completion.wait().unwrap_err();
        assert_eq!(failure, Failure::Rejected("boom"));
        assert_eq!(failure.to_string(), "boom");
        assert_eq!(failure.rejected(), Some("boom"));
    }

    #[test]
    fn test_abandoned() {
        let completion: Completion<u8, Infallible> = Completion::new(drop);
        assert_eq!(completion.wait(), Err(Failure::Abandoned));
    }

    #[test]
    fn test_try_take() {
        let mut held = None;
        let mut completion: Completion<u8, Infallible> =
            Completion::new(|promise| held = Some(promise));
        assert_eq!(completion.try_take(), None);

        if let Some(promise) = held.take() {
            promise.fulfill(3);
        }
        assert_eq!(completion.try_take(), Some(Ok(3)));
    }

    #[test]
    fn test_settle_after_receiver_dropped() {
        let mut held = None;
        let completion: Completion<u8, Infallible> = Completion::new(|promise| held = Some(promise));
        drop(completion);
        if let Some(promise) = held {
            promise.fulfill(1);
        }
    }

    #[test]
    fn test_on_complete() {
        let mut seen = None;
        Completion::<_, String>::ready(Ok("done")).on_complete(|result| seen = Some(result));
        assert_eq!(seen, Some(Ok("done")));
    }

    #[test]
    fn test_result_outcome() {
        let outcome: Result<u8, String> = Err("bad".into());
        assert_eq!(Outcome::into_result(outcome), Err("bad".to_string()));
    }
}
