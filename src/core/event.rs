use std::fmt;

/// A particle-particle contact found by the engine.
///
/// `i` is the particle being stepped, `j` the first other particle that registered
/// a contact. `x` / `y` record which velocity components of `i` were flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub i: usize,
    pub j: usize,
    pub x: bool,
    pub y: bool,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "particle collision: {}+{}", self.i, self.j)
    }
}

/// Receiver of collision notifications.
///
/// Notifications are advisory; the engine never reads anything back.
pub trait CollisionObserver {
    /// Called once per reported contact.
    fn on_collision(&mut self, collision: &Collision);

    /// Called by the driver before the first particle of tick `tick` is stepped.
    fn on_tick(&mut self, _tick: u64) {}
}

/// Forwards notifications to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CollisionObserver for LogObserver {
    fn on_collision(&mut self, collision: &Collision) {
        log::info!("{collision}");
    }
}

/// Discards notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CollisionObserver for NullObserver {
    fn on_collision(&mut self, _collision: &Collision) {}
}

/// Records every notification together with the tick it was raised on.
#[derive(Debug, Default, Clone)]
pub struct CollisionLog {
    tick: u64,
    entries: Vec<(u64, Collision)>,
}

impl CollisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(tick, collision)` pairs in emission order.
    pub fn entries(&self) -> &[(u64, Collision)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notification lines as the observer output would print them.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|(_, c)| c.to_string()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl CollisionObserver for CollisionLog {
    fn on_collision(&mut self, collision: &Collision) {
        self.entries.push((self.tick, *collision));
    }

    fn on_tick(&mut self, tick: u64) {
        self.tick = tick;
    }
}

impl<O: CollisionObserver + ?Sized> CollisionObserver for &mut O {
    fn on_collision(&mut self, collision: &Collision) {
        (**self).on_collision(collision);
    }

    fn on_tick(&mut self, tick: u64) {
        (**self).on_tick(tick);
    }
}
