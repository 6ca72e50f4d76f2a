//! Three-phase events with ordered subscribers.
//!
//! Each event has three subscriber lists, run in subscription order:
//!
//! - `before`: side-effecting hooks run before the event happens
//! - `apply`: a chain that transforms an integer amount (damage math)
//! - `after`: side-effecting hooks run once the event has happened
//!
//! Subscribers are plain function pointers, so an event is immutable data
//! once built and can be shared between cloned battle states.
//!
//! ```
//! use card_battler::events::Event;
//!
//! fn double(amount: i32, _ctx: &(), _state: &Vec<&str>) -> i32 { amount * 2 }
//! fn plus_one(amount: i32, _ctx: &(), _state: &Vec<&str>) -> i32 { amount + 1 }
//! fn log(_ctx: &(), state: &mut Vec<&str>) { state.push("after") }
//!
//! let event: Event<(), Vec<&str>> = Event::new("demo")
//!     .subscribe_apply("double", double)
//!     .subscribe_apply("plus_one", plus_one)
//!     .subscribe_after("log", log);
//!
//! let mut state = Vec::new();
//! assert_eq!(event.broadcast_apply(5, &(), &state), 11);
//! event.broadcast_after(&(), &mut state);
//! assert_eq!(state, vec!["after"]);
//! ```

/// Side-effecting subscriber.
pub type HookFn<C, S> = fn(&C, &mut S);

/// Amount-transforming subscriber.
pub type ApplyFn<C, S> = fn(i32, &C, &S) -> i32;

/// A named subscriber.
pub struct Subscriber<F> {
    pub name: &'static str,
    pub handler: F,
}

/// An event with context `C` over state `S`.
pub struct Event<C, S> {
    name: &'static str,
    before: Vec<Subscriber<HookFn<C, S>>>,
    apply: Vec<Subscriber<ApplyFn<C, S>>>,
    after: Vec<Subscriber<HookFn<C, S>>>,
}

impl<C, S> Event<C, S> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            before: Vec::new(),
            apply: Vec::new(),
            after: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn subscribe_before(mut self, name: &'static str, handler: HookFn<C, S>) -> Self {
        self.before.push(Subscriber { name, handler });
        self
    }

    #[must_use]
    pub fn subscribe_apply(mut self, name: &'static str, handler: ApplyFn<C, S>) -> Self {
        self.apply.push(Subscriber { name, handler });
        self
    }

    #[must_use]
    pub fn subscribe_after(mut self, name: &'static str, handler: HookFn<C, S>) -> Self {
        self.after.push(Subscriber { name, handler });
        self
    }

    pub fn broadcast_before(&self, ctx: &C, state: &mut S) {
        for subscriber in &self.before {
            (subscriber.handler)(ctx, state);
        }
    }

    /// Pipe `amount` through every apply subscriber in order.
    #[must_use]
    pub fn broadcast_apply(&self, amount: i32, ctx: &C, state: &S) -> i32 {
        self.apply
            .iter()
            .fold(amount, |amount, subscriber| (subscriber.handler)(amount, ctx, state))
    }

    pub fn broadcast_after(&self, ctx: &C, state: &mut S) {
        for subscriber in &self.after {
            (subscriber.handler)(ctx, state);
        }
    }

    /// Names of the apply subscribers, in order.
    pub fn apply_order(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.apply.iter().map(|s| s.name)
    }
}

impl<C, S> std::fmt::Debug for Event<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("before", &names(&self.before))
            .field("apply", &names(&self.apply))
            .field("after", &names(&self.after))
            .finish()
    }
}

fn names<F>(list: &[Subscriber<F>]) -> Vec<&'static str> {
    list.iter().map(|s| s.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<&'static str>;

    fn first(_: &u8, log: &mut Log) {
        log.push("first");
    }

    fn second(_: &u8, log: &mut Log) {
        log.push("second");
    }

    fn add_ctx(amount: i32, ctx: &u8, _: &Log) -> i32 {
        amount + i32::from(*ctx)
    }

    fn halve(amount: i32, _: &u8, _: &Log) -> i32 {
        amount / 2
    }

    #[test]
    fn test_hooks_run_in_subscription_order() {
        let event: Event<u8, Log> = Event::new("order")
            .subscribe_before("first", first)
            .subscribe_before("second", second)
            .subscribe_after("second", second)
            .subscribe_after("first", first);

        let mut log = Log::new();
        event.broadcast_before(&0, &mut log);
        event.broadcast_after(&0, &mut log);
        assert_eq!(log, vec!["first", "second", "second", "first"]);
    }

    #[test]
    fn test_apply_chain_order_matters() {
        let add_then_halve: Event<u8, Log> = Event::new("a")
            .subscribe_apply("add", add_ctx)
            .subscribe_apply("halve", halve);
        let halve_then_add: Event<u8, Log> = Event::new("b")
            .subscribe_apply("halve", halve)
            .subscribe_apply("add", add_ctx);

        let log = Log::new();
        assert_eq!(add_then_halve.broadcast_apply(10, &4, &log), 7);
        assert_eq!(halve_then_add.broadcast_apply(10, &4, &log), 9);
        assert_eq!(add_then_halve.apply_order().collect::<Vec<_>>(), vec!["add", "halve"]);
    }

    #[test]
    fn test_empty_event_is_identity() {
        let event: Event<u8, Log> = Event::new("empty");
        let mut log = Log::new();
        assert_eq!(event.broadcast_apply(3, &1, &log), 3);
        event.broadcast_before(&1, &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn test_debug_lists_subscriber_names() {
        let event: Event<u8, Log> = Event::new("dbg").subscribe_apply("halve", halve);
        let text = format!("{event:?}");
        assert!(text.contains("dbg"));
        assert!(text.contains("halve"));
    }
}
