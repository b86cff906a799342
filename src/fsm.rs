use log::debug;

/// Predicate deciding whether a [`Transition`] may fire this tick.
/// Reads the controller, never mutates it.
pub type Guard<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// Factory constructing the state a [`Transition`] leads to.
/// Pure apart from the allocation; the driver calls it at most once,
/// immediately after the paired guard held.
pub type NextState<C> = Box<dyn Fn() -> Box<dyn State<C>> + Send + Sync>;

/// Capability interface every concrete state implements.
///
/// `C` is the controller type, the owning agent's data. It is passed
/// explicitly to every hook and guard; states never hold a reference to it,
/// so the controller's ownership stays with the entity.
///
/// # Usage
/// ```
/// use vesper::fsm::{State, StateMachine, Transition};
///
/// struct Door { open: bool }
///
/// struct Closed { transitions: Vec<Transition<Door>> }
///
/// impl Closed {
///     fn boxed() -> Box<dyn State<Door>> {
///         Box::new(Closed {
///             transitions: vec![Transition::new(|d: &Door| d.open, Open::boxed)],
///         })
///     }
/// }
///
/// impl State<Door> for Closed {
///     fn transitions(&self) -> &[Transition<Door>] { &self.transitions }
///     fn name(&self) -> &'static str { "Closed" }
/// }
///
/// struct Open;
///
/// impl Open {
///     fn boxed() -> Box<dyn State<Door>> { Box::new(Open) }
/// }
///
/// impl State<Door> for Open {
///     fn transitions(&self) -> &[Transition<Door>] { &[] }
///     fn name(&self) -> &'static str { "Open" }
/// }
///
/// let mut door = Door { open: false };
/// let mut machine = StateMachine::new(Closed::boxed(), &mut door);
/// machine.tick(&mut door, 1.0 / 60.0);
/// assert_eq!(machine.current(), "Closed");
///
/// door.open = true;
/// machine.tick(&mut door, 1.0 / 60.0);
/// assert_eq!(machine.current(), "Open");
/// ```
pub trait State<C>: Send + Sync {
    /// Called exactly once, immediately after construction and before the
    /// first `on_update`.
    fn on_enter(&mut self, _ctx: &mut C) {}

    /// Called at most once per tick, only on ticks where no transition fired.
    fn on_update(&mut self, _ctx: &mut C, _dt: f32) {}

    /// Called exactly once, when the driver leaves this state, before the
    /// replacement state is entered.
    fn on_exit(&mut self, _ctx: &mut C) {}

    /// Outgoing transitions in priority order. First match wins, so a
    /// tighter guard must be declared before a wider one it overlaps with.
    fn transitions(&self) -> &[Transition<C>];

    /// Short label used in transition logs.
    fn name(&self) -> &'static str;
}

/// An immutable guard/next-state pair owned by the state it leads out of.
pub struct Transition<C> {
    guard: Guard<C>,
    next: NextState<C>,
}

impl<C> Transition<C> {
    pub fn new<G, N>(guard: G, next: N) -> Self
    where
        G: Fn(&C) -> bool + Send + Sync + 'static,
        N: Fn() -> Box<dyn State<C>> + Send + Sync + 'static,
    {
        Self {
            guard: Box::new(guard),
            next: Box::new(next),
        }
    }

    /// Current truth value of the guard. Side-effect free.
    pub fn evaluate(&self, ctx: &C) -> bool {
        (self.guard)(ctx)
    }

    /// Construct the destination state. Only meaningful immediately after
    /// [`evaluate`](Self::evaluate) returned true within the same tick; the
    /// driver is the only expected caller.
    pub fn resolve(&self) -> Box<dyn State<C>> {
        (self.next)()
    }
}

/// The driver: owns the current state and runs the per-tick
/// select-then-update loop. There is always exactly one current state.
pub struct StateMachine<C> {
    current: Box<dyn State<C>>,
}

impl<C> StateMachine<C> {
    /// Create the driver and enter `initial` (its `on_enter` runs here).
    pub fn new(mut initial: Box<dyn State<C>>, ctx: &mut C) -> Self {
        debug!("fsm: enter {}", initial.name());
        initial.on_enter(ctx);
        Self { current: initial }
    }

    /// Name of the state the machine currently sits in.
    pub fn current(&self) -> &'static str {
        self.current.name()
    }

    /// Run one simulation tick.
    ///
    /// Scans the current state's transitions in declaration order and fires
    /// the first whose guard holds: `on_exit` on the old state, then the
    /// factory, then `on_enter` on the new one. At most one transition per
    /// tick, and `on_update` runs for neither state on a transition tick:
    /// enter/exit always bracket exactly one state each, and update never
    /// races a transition. Only when no guard holds does the current state
    /// get its `on_update`.
    pub fn tick(&mut self, ctx: &mut C, dt: f32) {
        let selected = self
            .current
            .transitions()
            .iter()
            .position(|t| t.evaluate(ctx));

        match selected {
            Some(index) => {
                self.current.on_exit(ctx);
                let mut next = self.current.transitions()[index].resolve();
                debug!("fsm: {} -> {}", self.current.name(), next.name());
                next.on_enter(ctx);
                self.current = next;
            }
            None => self.current.on_update(ctx, dt),
        }
    }
}
