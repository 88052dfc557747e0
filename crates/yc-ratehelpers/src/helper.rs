//! The `RateHelper` contract and the state shared by every helper.
//!
//! A rate helper wraps one market observable together with the conventions
//! needed to turn it into a constraint on the curve under construction.  At
//! bootstrap time the engine links a trial curve into each helper via
//! [`RateHelper::set_term_structure`], then drives the residual
//! [`RateHelper::quote_error`] to zero pillar by pillar.
//!
//! Helpers are shared as `Arc<dyn RateHelper>`; they register themselves as
//! observers of their quote (and, for relative-date helpers, of the
//! evaluation date) and re-emit every notification to their own observers.

use std::sync::{Arc, Mutex, Weak};

use yc_core::errors::{Error, Result};
use yc_core::{Observer, ObserverList, Real, RelinkableHandle};
use yc_quotes::Quote;
use yc_termstructures::YieldTermStructure;
use yc_time::{Date, EvaluationDate};

/// Discriminates the concrete helper behind a `dyn RateHelper`.
///
/// External code that needs instrument-specific treatment switches on the
/// kind and downcasts through the helper's own inspectors instead of relying
/// on double dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelperKind {
    /// Money-market deposit.
    Deposit,
    /// Forward-rate agreement.
    Fra,
    /// Interest-rate futures contract.
    Futures,
    /// Fixed-for-floating vanilla swap.
    Swap,
    /// Tenor-basis (float-for-float) swap.
    FloatFloatSwap,
    /// BMA-versus-Ibor fraction swap.
    BmaSwap,
    /// FX swap forward point.
    FxSwap,
}

/// The date set a helper exposes to the bootstrap.
///
/// Invariant: `earliest <= pillar <= maturity` and
/// `earliest <= latest_relevant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperDates {
    /// Earliest curve date the helper's pricing depends on.
    pub earliest: Date,
    /// The node date contributed to the bootstrap grid.
    pub pillar: Date,
    /// The instrument's maturity date.
    pub maturity: Date,
    /// Latest curve date the helper's pricing depends on.
    pub latest_relevant: Date,
}

impl HelperDates {
    fn null() -> Self {
        Self {
            earliest: Date::NULL,
            pillar: Date::NULL,
            maturity: Date::NULL,
            latest_relevant: Date::NULL,
        }
    }
}

/// State common to every rate helper: the market quote, the trial-curve
/// handle, the derived date set, the helper's own observer list, and a slot
/// for errors raised inside observer callbacks.
///
/// Observer callbacks must not fail; when a date re-derivation goes wrong
/// the error is parked here and surfaced by the next pricing call.
pub struct HelperCore {
    label: String,
    quote: Arc<dyn Quote>,
    term_structure: RelinkableHandle<dyn YieldTermStructure>,
    dates: Mutex<HelperDates>,
    observers: ObserverList,
    pending: Mutex<Option<Error>>,
}

impl HelperCore {
    /// Create the shared state for a helper identified by `label` in error
    /// messages.
    pub fn new(label: impl Into<String>, quote: Arc<dyn Quote>) -> Self {
        Self {
            label: label.into(),
            quote,
            term_structure: RelinkableHandle::empty(),
            dates: Mutex::new(HelperDates::null()),
            observers: ObserverList::new(),
            pending: Mutex::new(None),
        }
    }

    /// The helper's label, used in error messages.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The market quote.
    pub fn quote(&self) -> &Arc<dyn Quote> {
        &self.quote
    }

    /// The current quote value, or [`Error::EmptyQuote`].
    pub fn quote_value(&self) -> Result<Real> {
        self.quote
            .value()
            .ok_or_else(|| Error::EmptyQuote(self.label.clone()))
    }

    /// The relinkable handle the trial curve is delivered through.
    ///
    /// Helpers that forward a leg off the curve under construction clone
    /// this handle into the relevant index.
    pub fn term_structure_handle(&self) -> &RelinkableHandle<dyn YieldTermStructure> {
        &self.term_structure
    }

    /// The trial curve, or [`Error::NotReady`] if none has been linked yet.
    pub fn curve(&self) -> Result<Arc<dyn YieldTermStructure>> {
        self.term_structure
            .current()
            .ok_or_else(|| Error::NotReady(self.label.clone()))
    }

    /// Link `curve` as the trial curve.
    ///
    /// The relink is quiet: the curve under construction already depends on
    /// the helper, so notifying the helper's observers here would bounce the
    /// notification straight back into the curve.
    pub fn set_term_structure(&self, curve: Arc<dyn YieldTermStructure>) {
        self.term_structure.link_to_quietly(curve);
    }

    /// Snapshot the current date set.
    pub fn dates(&self) -> HelperDates {
        *self.dates.lock().expect("helper dates mutex poisoned")
    }

    /// Replace the date set after a (re-)derivation.
    pub fn set_dates(&self, dates: HelperDates) {
        *self.dates.lock().expect("helper dates mutex poisoned") = dates;
    }

    /// Park an error raised inside an observer callback.
    pub fn store_error(&self, error: Error) {
        *self.pending.lock().expect("helper error mutex poisoned") = Some(error);
    }

    /// Surface any parked error, clearing the slot.
    pub fn take_pending(&self) -> Result<()> {
        match self
            .pending
            .lock()
            .expect("helper error mutex poisoned")
            .take()
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// The helper's own observer list.
    pub fn observers(&self) -> &ObserverList {
        &self.observers
    }

    /// Notify the helper's observers.
    pub fn notify(&self) {
        self.observers.notify();
    }
}

impl std::fmt::Debug for HelperCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperCore")
            .field("label", &self.label)
            .field("dates", &self.dates())
            .finish()
    }
}

/// A market instrument usable as a yield-curve bootstrap constraint.
pub trait RateHelper: std::fmt::Debug + Send + Sync {
    /// Access to the state shared by all helpers.
    fn core(&self) -> &HelperCore;

    /// The quote value implied by the trial curve.
    ///
    /// Pure in the curve and the helper's frozen dates; fails with
    /// [`Error::NotReady`] before [`RateHelper::set_term_structure`].
    fn implied_quote(&self) -> Result<Real>;

    /// Which concrete instrument this helper wraps.
    fn kind(&self) -> HelperKind;

    /// The market quote.
    fn quote(&self) -> &Arc<dyn Quote> {
        self.core().quote()
    }

    /// The current quote value, or [`Error::EmptyQuote`].
    fn quote_value(&self) -> Result<Real> {
        self.core().quote_value()
    }

    /// The bootstrap residual `quote - implied_quote` on the trial curve.
    fn quote_error(&self) -> Result<Real> {
        Ok(self.quote_value()? - self.implied_quote()?)
    }

    /// Earliest curve date the helper depends on.
    fn earliest_date(&self) -> Date {
        self.core().dates().earliest
    }

    /// The node date contributed to the bootstrap grid.
    fn pillar_date(&self) -> Date {
        self.core().dates().pillar
    }

    /// The instrument's maturity date.
    fn maturity_date(&self) -> Date {
        self.core().dates().maturity
    }

    /// Latest curve date the helper depends on.
    fn latest_relevant_date(&self) -> Date {
        self.core().dates().latest_relevant
    }

    /// Link the curve under construction into the helper.
    ///
    /// The default implementation relinks quietly; helpers that also hold an
    /// exogenous curve override this to reject linking the same curve twice.
    fn set_term_structure(&self, curve: Arc<dyn YieldTermStructure>) -> Result<()> {
        self.core().set_term_structure(curve);
        Ok(())
    }

    /// Register an observer of this helper (typically the bootstrap engine).
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.core().observers().register(observer);
    }

    /// Unregister a previously registered observer.
    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.core().observers().unregister(observer);
    }
}

/// Evaluation-date tracking for helpers whose dates are derived from today.
///
/// The owning helper checks [`RelativeDateCore::evaluation_date_moved`] in
/// its `update` hook and re-derives its dates only when the date actually
/// changed; other notifications (quote changes, curve changes) pass through
/// untouched.
pub struct RelativeDateCore {
    evaluation: Arc<EvaluationDate>,
    last_seen: Mutex<Date>,
}

impl RelativeDateCore {
    /// Track `evaluation`, recording its current value as already seen.
    pub fn new(evaluation: Arc<EvaluationDate>) -> Self {
        let today = evaluation.value();
        Self {
            evaluation,
            last_seen: Mutex::new(today),
        }
    }

    /// The shared evaluation-date context.
    pub fn evaluation_date(&self) -> &Arc<EvaluationDate> {
        &self.evaluation
    }

    /// The current evaluation date.
    pub fn today(&self) -> Date {
        self.evaluation.value()
    }

    /// Return `true`, exactly once per change, if the evaluation date moved
    /// since the last call.
    pub fn evaluation_date_moved(&self) -> bool {
        let today = self.evaluation.value();
        let mut seen = self
            .last_seen
            .lock()
            .expect("evaluation tracking mutex poisoned");
        if *seen == today {
            false
        } else {
            *seen = today;
            true
        }
    }
}

impl std::fmt::Debug for RelativeDateCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelativeDateCore")
            .field("today", &self.today())
            .finish()
    }
}
