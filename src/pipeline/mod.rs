//! Message processing pipeline
//!
//! Three capability roles over `(token, message)`: an [`Observer`] watches,
//! a [`Processor`] validates, a [`Modifier`] transforms. Each role has an
//! ordered composite ([`Observers`], [`Processors`], [`Modifiers`]) with a
//! shared contract: steps run in order, cancellation is polled once per
//! step boundary, a hard error stops the run, and a step that does not
//! apply reports [`Verdict::NotHandled`] without stopping anything.
//!
//! Plain closures implement all three roles, so pipelines can be assembled
//! from functions without naming a struct.

mod cancel;
mod modifiers;

pub use cancel::CancelToken;
pub use modifiers::{MetadataInjector, SelfLocatorRewriter};

use tracing::{debug, trace};

use crate::error::Error;
use crate::message::Message;

/// Outcome of a pipeline step that ran without failing.
///
/// Declining to act is an ordinary outcome, not an error: a rule that does
/// not apply to the message at hand reports [`Verdict::NotHandled`] and the
/// run continues. Only an `Err` stops a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The step applied to this message and succeeded
    Handled,
    /// The step does not apply to this message
    NotHandled,
}

/// Watches messages without producing a result.
pub trait Observer: Send + Sync {
    /// Observe a message.
    fn observe(&self, token: &CancelToken, msg: &Message);
}

impl<F> Observer for F
where
    F: Fn(&CancelToken, &Message) + Send + Sync,
{
    fn observe(&self, token: &CancelToken, msg: &Message) {
        self(token, msg);
    }
}

/// Examines messages, reporting success, failure, or "does not apply".
pub trait Processor: Send + Sync {
    /// Process a message.
    fn process(&self, token: &CancelToken, msg: &Message) -> Result<Verdict, Error>;
}

impl<F> Processor for F
where
    F: Fn(&CancelToken, &Message) -> Result<Verdict, Error> + Send + Sync,
{
    fn process(&self, token: &CancelToken, msg: &Message) -> Result<Verdict, Error> {
        self(token, msg)
    }
}

/// Transforms messages in place, with the [`Processor`] verdict contract.
pub trait Modifier: Send + Sync {
    /// Modify a message. On [`Verdict::NotHandled`] the message may still
    /// have been changed; only an `Err` promises the composite will restore
    /// the pre-step value.
    fn modify(&self, token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error>;
}

impl<F> Modifier for F
where
    F: Fn(&CancelToken, &mut Message) -> Result<Verdict, Error> + Send + Sync,
{
    fn modify(&self, token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        self(token, msg)
    }
}

/// Lift an [`Observer`] into a [`Processor`] or [`Modifier`] that runs the
/// observation and always reports [`Verdict::NotHandled`].
#[derive(Debug, Clone, Copy)]
pub struct Observing<O>(pub O);

impl<O: Observer> Processor for Observing<O> {
    fn process(&self, token: &CancelToken, msg: &Message) -> Result<Verdict, Error> {
        self.0.observe(token, msg);
        Ok(Verdict::NotHandled)
    }
}

impl<O: Observer> Modifier for Observing<O> {
    fn modify(&self, token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        self.0.observe(token, msg);
        Ok(Verdict::NotHandled)
    }
}

/// Lift a [`Processor`] into a [`Modifier`] that never changes the message.
#[derive(Debug, Clone, Copy)]
pub struct Processing<P>(pub P);

impl<P: Processor> Modifier for Processing<P> {
    fn modify(&self, token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        self.0.process(token, msg)
    }
}

/// Ordered sequence of observers.
#[derive(Default)]
pub struct Observers(Vec<Box<dyn Observer>>);

impl Observers {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer, builder style.
    #[must_use]
    pub fn with(mut self, observer: impl Observer + 'static) -> Self {
        self.0.push(Box::new(observer));
        self
    }

    /// Append an observer.
    pub fn push(&mut self, observer: impl Observer + 'static) {
        self.0.push(Box::new(observer));
    }

    /// Number of observers in the sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the sequence is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Run every observer in order.
    ///
    /// Cancellation is polled before each step; once observed, remaining
    /// observers are skipped and the cancellation surfaces as the error.
    pub fn observe(&self, token: &CancelToken, msg: &Message) -> Result<(), Error> {
        for observer in &self.0 {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
            observer.observe(token, msg);
        }
        Ok(())
    }
}

impl Observer for Observers {
    fn observe(&self, token: &CancelToken, msg: &Message) {
        // As a single step inside another composite the result has nowhere
        // to go; the outer composite's own polling surfaces cancellation.
        let _ = Observers::observe(self, token, msg);
    }
}

impl<O: Observer + 'static> FromIterator<O> for Observers {
    fn from_iter<I: IntoIterator<Item = O>>(iter: I) -> Self {
        let mut observers = Self::new();
        observers.extend(iter);
        observers
    }
}

impl<O: Observer + 'static> Extend<O> for Observers {
    fn extend<I: IntoIterator<Item = O>>(&mut self, iter: I) {
        for observer in iter {
            self.push(observer);
        }
    }
}

/// Ordered sequence of processors.
#[derive(Default)]
pub struct Processors(Vec<Box<dyn Processor>>);

impl Processors {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor, builder style.
    #[must_use]
    pub fn with(mut self, processor: impl Processor + 'static) -> Self {
        self.0.push(Box::new(processor));
        self
    }

    /// Append a processor.
    pub fn push(&mut self, processor: impl Processor + 'static) {
        self.0.push(Box::new(processor));
    }

    /// Number of processors in the sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the sequence is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Run the sequence against a message.
    ///
    /// Steps run in order. Cancellation is polled before each step. A step
    /// error stops the run and is returned unchanged. A [`Verdict::Handled`]
    /// marks the whole run handled but does not stop it; every step runs
    /// unless a hard error or cancellation intervenes. An empty sequence,
    /// or one where nothing applied, reports [`Verdict::NotHandled`].
    pub fn process(&self, token: &CancelToken, msg: &Message) -> Result<Verdict, Error> {
        let mut handled = false;
        for (step, processor) in self.0.iter().enumerate() {
            if token.is_cancelled() {
                trace!(step, "processor run cancelled");
                return Err(Error::Cancelled);
            }
            match processor.process(token, msg) {
                Ok(Verdict::Handled) => handled = true,
                Ok(Verdict::NotHandled) => {}
                Err(err) => {
                    debug!(step, %err, "processor run stopped");
                    return Err(err);
                }
            }
        }
        Ok(if handled {
            Verdict::Handled
        } else {
            Verdict::NotHandled
        })
    }
}

impl Processor for Processors {
    fn process(&self, token: &CancelToken, msg: &Message) -> Result<Verdict, Error> {
        Processors::process(self, token, msg)
    }
}

impl<P: Processor + 'static> FromIterator<P> for Processors {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut processors = Self::new();
        processors.extend(iter);
        processors
    }
}

impl<P: Processor + 'static> Extend<P> for Processors {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for processor in iter {
            self.push(processor);
        }
    }
}

/// Ordered sequence of modifiers.
#[derive(Default)]
pub struct Modifiers(Vec<Box<dyn Modifier>>);

impl Modifiers {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a modifier, builder style.
    #[must_use]
    pub fn with(mut self, modifier: impl Modifier + 'static) -> Self {
        self.0.push(Box::new(modifier));
        self
    }

    /// Append a modifier.
    pub fn push(&mut self, modifier: impl Modifier + 'static) {
        self.0.push(Box::new(modifier));
    }

    /// Number of modifiers in the sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the sequence is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Run the sequence against a message, in place.
    ///
    /// Same contract as [`Processors::process`], plus: when a step fails,
    /// the message is restored to its value before that step, so a failed
    /// run never leaves a half-applied change from the failing step. On
    /// cancellation the message keeps the modifications applied so far.
    pub fn modify(&self, token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        let mut handled = false;
        for (step, modifier) in self.0.iter().enumerate() {
            if token.is_cancelled() {
                trace!(step, "modifier run cancelled");
                return Err(Error::Cancelled);
            }
            let before = msg.clone();
            match modifier.modify(token, msg) {
                Ok(Verdict::Handled) => handled = true,
                Ok(Verdict::NotHandled) => {}
                Err(err) => {
                    debug!(step, %err, "modifier run stopped");
                    *msg = before;
                    return Err(err);
                }
            }
        }
        Ok(if handled {
            Verdict::Handled
        } else {
            Verdict::NotHandled
        })
    }
}

impl Modifier for Modifiers {
    fn modify(&self, token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        Modifiers::modify(self, token, msg)
    }
}

impl<M: Modifier + 'static> FromIterator<M> for Modifiers {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut modifiers = Self::new();
        modifiers.extend(iter);
        modifiers
    }
}

impl<M: Modifier + 'static> Extend<M> for Modifiers {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        for modifier in iter {
            self.push(modifier);
        }
    }
}
