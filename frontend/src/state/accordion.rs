//! Accordion panel state machine.
//!
//! Each panel moves `Closed -> Opening -> Open -> Closing -> Closed`. The
//! transient phases end when the controller's settle timer fires and calls
//! [`AccordionState::settle`]. Opening and Open both count as expanded, and at
//! most one panel is expanded at any time.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelPhase {
    pub fn is_expanded(self) -> bool {
        matches!(self, PanelPhase::Opening | PanelPhase::Open)
    }
}

/// One DOM change the controller has to play out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Open { index: usize, first_open: bool },
    Close { index: usize },
}

#[derive(Debug, Clone)]
pub struct AccordionState {
    phases: Vec<PanelPhase>,
    /// Panels able to show the first-open emphasis (they sit in an item).
    emphasis: Vec<bool>,
    first_open_pending: bool,
}

impl AccordionState {
    pub fn new(panels: usize) -> Self {
        Self::with_emphasis(vec![true; panels])
    }

    /// One flag per panel. The one-shot emphasis is only spent on a panel
    /// whose flag is set.
    pub fn with_emphasis(emphasis: Vec<bool>) -> Self {
        Self {
            phases: vec![PanelPhase::Closed; emphasis.len()],
            emphasis,
            first_open_pending: true,
        }
    }

    pub fn phase(&self, index: usize) -> Option<PanelPhase> {
        self.phases.get(index).copied()
    }

    /// Click or Enter/Space on the header at `index`. Closes go first so the
    /// caller can apply the returned transitions in order.
    pub fn activate(&mut self, index: usize) -> Vec<Transition> {
        let Some(phase) = self.phase(index) else {
            return Vec::new();
        };

        if phase.is_expanded() {
            self.phases[index] = PanelPhase::Closing;
            return vec![Transition::Close { index }];
        }

        let mut transitions: Vec<Transition> = Vec::new();
        for (other, phase) in self.phases.iter_mut().enumerate() {
            if other != index && phase.is_expanded() {
                *phase = PanelPhase::Closing;
                transitions.push(Transition::Close { index: other });
            }
        }

        self.phases[index] = PanelPhase::Opening;
        let first_open = self.first_open_pending && self.emphasis[index];
        if first_open {
            self.first_open_pending = false;
        }
        transitions.push(Transition::Open { index, first_open });
        transitions
    }

    /// Settle timer for `index` fired. Anything other than a transient phase is
    /// left alone.
    pub fn settle(&mut self, index: usize) -> Option<PanelPhase> {
        let phase = self.phases.get_mut(index)?;
        *phase = match *phase {
            PanelPhase::Opening => PanelPhase::Open,
            PanelPhase::Closing => PanelPhase::Closed,
            settled => settled,
        };
        Some(*phase)
    }
}

/// Identifies one armed settle. A settle whose token is no longer current
/// belongs to a transition that has since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleToken(u64);

#[derive(Debug)]
struct Pending<T> {
    token: Option<SettleToken>,
    _handle: T,
}

/// At most one pending settle per panel. `T` is whatever keeps the timer
/// alive; arming a slot drops the previous handle, which cancels it.
#[derive(Debug)]
pub struct PendingSettles<T> {
    slots: Vec<Option<Pending<T>>>,
    next_token: u64,
}

impl<T> PendingSettles<T> {
    pub fn new(panels: usize) -> Self {
        Self {
            slots: (0..panels).map(|_| None).collect(),
            next_token: 0,
        }
    }

    /// Replaces any settle pending on `index`. `make` builds the timer for
    /// the new token.
    pub fn arm<F>(&mut self, index: usize, make: F) -> Option<SettleToken>
    where
        F: FnOnce(SettleToken) -> T,
    {
        let slot = self.slots.get_mut(index)?;
        // drop the old timer before the new one exists
        *slot = None;

        let token = SettleToken(self.next_token);
        self.next_token += 1;
        *slot = Some(Pending {
            token: Some(token),
            _handle: make(token),
        });
        Some(token)
    }

    pub fn cancel(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Called when a timer fires. `true` only for the current settle of
    /// `index`, and only once. The handle stays in place since it is the one
    /// running.
    pub fn fire(&mut self, index: usize, token: SettleToken) -> bool {
        match self.slots.get_mut(index) {
            Some(Some(pending)) if pending.token == Some(token) => {
                pending.token = None;
                true
            }
            _ => false,
        }
    }
}

/// Keys the accordion headers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKey {
    Activate,
    Next,
    Previous,
}

impl HeaderKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " => Some(HeaderKey::Activate),
            "ArrowDown" => Some(HeaderKey::Next),
            "ArrowUp" => Some(HeaderKey::Previous),
            _ => None,
        }
    }
}

pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}
