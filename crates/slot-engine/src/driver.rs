//! Drivers connecting the selection engine to a navigation mechanism.
//!
//! Both drivers delegate every decision to [`engine::on_slot_click`], so a click
//! sequence produces the same booking whichever one is in use. They differ only
//! in where the flow state lives: the [`StackDriver`] keeps it in the pushed
//! views, the [`StoreDriver`] keeps it in a [`Store`] and moves between routes.

use chrono::NaiveDate;
use tracing::debug;

use crate::availability::AvailabilityMap;
use crate::clock::TimeSlot;
use crate::engine::{self, BookingRequest, NextAction, SelectionPhase, SelectionState};
use crate::error::{Result, SlotError};
use crate::navigation::{Router, StackNavigator, View, AVAILABLE_SLOTS_ROUTE, BOOK_ROUTE};
use crate::store::{Action, SlotType, StaffState, Store};

/// A booking flow driven by user interaction events.
pub trait SelectionDriver {
    /// A date was confirmed on the calendar.
    fn select_date(&mut self, date: NaiveDate);

    /// The slot at `index` of the current list was clicked.
    ///
    /// Returns the booking once the end time is chosen.
    fn select_slot(&mut self, index: usize) -> Result<Option<BookingRequest>>;

    /// Return to the previous step without recomputing anything.
    fn go_back(&mut self);

    /// The flow instance currently on display, if any.
    fn selection(&self) -> Option<SelectionState>;
}

fn slot_at(state: &SelectionState, index: usize) -> Result<TimeSlot> {
    state
        .slots
        .get(index)
        .cloned()
        .ok_or(SlotError::IndexOutOfRange {
            index,
            len: state.slots.len(),
        })
}

// ---------------------------------------------------------------------------
// Stack navigator
// ---------------------------------------------------------------------------

/// Pushes one view per step onto a [`StackNavigator`].
pub struct StackDriver<N> {
    navigator: N,
    availability: AvailabilityMap,
    duration_minutes: u32,
}

impl<N: StackNavigator> StackDriver<N> {
    pub fn new(navigator: N, availability: AvailabilityMap, duration_minutes: u32) -> Self {
        Self {
            navigator,
            availability,
            duration_minutes,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

impl<N: StackNavigator> SelectionDriver for StackDriver<N> {
    fn select_date(&mut self, date: NaiveDate) {
        let slots = self.availability.slots_for_date(date);
        self.navigator
            .push_view(View::Slots(SelectionState::start(date, slots)));
    }

    fn select_slot(&mut self, index: usize) -> Result<Option<BookingRequest>> {
        let state = self.selection().ok_or(SlotError::NoActiveSelection)?;
        let slot = slot_at(&state, index)?;

        match engine::on_slot_click(&state, &slot, index, self.duration_minutes)? {
            NextAction::Transition(next) => {
                self.navigator.push_view(View::Slots(next));
                Ok(None)
            }
            NextAction::Terminate(booking) => {
                self.navigator.push_view(View::BookingForm(booking.clone()));
                Ok(Some(booking))
            }
        }
    }

    fn go_back(&mut self) {
        self.navigator.pop_view();
    }

    fn selection(&self) -> Option<SelectionState> {
        match self.navigator.current() {
            Some(View::Slots(state)) => Some(state.clone()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Store + router
// ---------------------------------------------------------------------------

/// Expresses each step as a dispatched action and moves between fixed routes.
pub struct StoreDriver<R> {
    store: Store,
    router: R,
}

impl<R: Router> StoreDriver<R> {
    pub fn new(store: Store, router: R) -> Self {
        Self { store, router }
    }

    /// A driver over a fresh store for one staff member.
    pub fn for_staff(availability: AvailabilityMap, duration_minutes: u32, router: R) -> Self {
        Self::new(Store::new(StaffState::new(availability, duration_minutes)), router)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn router(&self) -> &R {
        &self.router
    }
}

impl<R: Router> SelectionDriver for StoreDriver<R> {
    fn select_date(&mut self, date: NaiveDate) {
        self.store.dispatch(Action::DateSelected { date });
        self.router.push(AVAILABLE_SLOTS_ROUTE);
    }

    fn select_slot(&mut self, index: usize) -> Result<Option<BookingRequest>> {
        let state = self.selection().ok_or(SlotError::NoActiveSelection)?;
        let slot = slot_at(&state, index)?;
        let duration_minutes = self.store.state().duration_minutes;

        match engine::on_slot_click(&state, &slot, index, duration_minutes)? {
            NextAction::Transition(next) => {
                self.store.dispatch(Action::TimeSlotSelected {
                    slot_time: slot,
                    slot_type: SlotType::StartTime {
                        end_slots: next.slots,
                    },
                });
                Ok(None)
            }
            NextAction::Terminate(booking) => {
                self.store.dispatch(Action::TimeSlotSelected {
                    slot_time: booking.end_time,
                    slot_type: SlotType::EndTime,
                });
                self.router.push(BOOK_ROUTE);
                let stored = self.store.state().booking();
                debug!(?stored, "booking ready");
                Ok(stored)
            }
        }
    }

    /// From the end-time phase, returns to the start-time phase on the same
    /// route by re-selecting the stored date. Otherwise leaves the route.
    fn go_back(&mut self) {
        let state = self.store.state();
        let on_slots = self.router.current_path() == Some(AVAILABLE_SLOTS_ROUTE);
        match (on_slots, state.slot_form, state.selected_date) {
            (true, SelectionPhase::End, Some(date)) => {
                self.store.dispatch(Action::DateSelected { date });
            }
            _ => self.router.go_back(),
        }
    }

    /// The store's flow instance, only while the slot picker route is showing.
    fn selection(&self) -> Option<SelectionState> {
        if self.router.current_path() != Some(AVAILABLE_SLOTS_ROUTE) {
            return None;
        }
        self.store.state().selection_state()
    }
}
