//! Tests for the staff store: reducer transitions, projections and subscribers.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use slot_engine::engine::{BookingRequest, SelectionPhase};
use slot_engine::store::{reduce, Action, SlotType, StaffState, Store};
use slot_engine::{AvailabilityMap, TimeSlot};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slots(labels: &[&str]) -> Vec<TimeSlot> {
    labels.iter().map(|l| TimeSlot::from(*l)).collect()
}

fn staff() -> StaffState {
    let availability =
        AvailabilityMap::from_json(r#"{"2017-04-01": ["7:00 PM", "8:00 PM"]}"#).unwrap();
    StaffState::new(availability, 60)
}

fn start_selected(slot: &str, end_slots: &[&str]) -> Action {
    Action::TimeSlotSelected {
        slot_time: slot.into(),
        slot_type: SlotType::StartTime {
            end_slots: slots(end_slots),
        },
    }
}

fn end_selected(slot: &str) -> Action {
    Action::TimeSlotSelected {
        slot_time: slot.into(),
        slot_type: SlotType::EndTime,
    }
}

// ── reduce ──────────────────────────────────────────────────────────────────

#[test]
fn date_selected_loads_slots_and_resets_form() {
    let state = reduce(staff(), &Action::DateSelected { date: date(2017, 4, 1) });

    assert_eq!(state.selected_date, Some(date(2017, 4, 1)));
    assert_eq!(state.slots_for_date, slots(&["7:00 PM", "8:00 PM"]));
    assert_eq!(state.slot_form, SelectionPhase::Start);
    assert_eq!(state.start_time, None);
}

#[test]
fn date_without_availability_has_no_slots() {
    let state = reduce(staff(), &Action::DateSelected { date: date(2017, 4, 2) });
    assert!(state.slots_for_date.is_empty());
}

#[test]
fn start_time_flips_form_to_end() {
    let state = reduce(staff(), &Action::DateSelected { date: date(2017, 4, 1) });
    let state = reduce(state, &start_selected("7:00 PM", &["8:00 PM", "9:00 PM"]));

    assert_eq!(state.slot_form, SelectionPhase::End);
    assert_eq!(state.start_time, Some("7:00 PM".into()));
    assert_eq!(state.slots_for_date, slots(&["8:00 PM", "9:00 PM"]));
}

#[test]
fn end_time_completes_booking() {
    let state = reduce(staff(), &Action::DateSelected { date: date(2017, 4, 1) });
    let state = reduce(state, &start_selected("7:00 PM", &["8:00 PM", "9:00 PM"]));
    let state = reduce(state, &end_selected("9:00 PM"));

    assert_eq!(
        state.booking(),
        Some(BookingRequest {
            date: date(2017, 4, 1),
            start_time: "7:00 PM".into(),
            end_time: "9:00 PM".into(),
        })
    );
}

#[test]
fn reselecting_a_date_clears_previous_times() {
    let state = reduce(staff(), &Action::DateSelected { date: date(2017, 4, 1) });
    let state = reduce(state, &start_selected("7:00 PM", &["8:00 PM"]));
    let state = reduce(state, &end_selected("8:00 PM"));
    let state = reduce(state, &Action::DateSelected { date: date(2017, 4, 1) });

    assert_eq!(state.start_time, None);
    assert_eq!(state.end_time, None);
    assert_eq!(state.booking(), None);
    assert_eq!(state.slot_form, SelectionPhase::Start);
}

#[test]
fn reducer_keeps_availability_and_duration() {
    let before = staff();
    let after = reduce(before.clone(), &Action::DateSelected { date: date(2017, 4, 1) });
    assert_eq!(after.availability, before.availability);
    assert_eq!(after.duration_minutes, 60);
}

// ── Projections ─────────────────────────────────────────────────────────────

#[test]
fn no_selection_before_a_date() {
    assert_eq!(staff().selection_state(), None);
}

#[test]
fn selection_tracks_slot_form() {
    let state = reduce(staff(), &Action::DateSelected { date: date(2017, 4, 1) });
    let selection = state.selection_state().unwrap();
    assert_eq!(selection.phase, SelectionPhase::Start);
    assert_eq!(selection.start_time, None);

    let state = reduce(state, &start_selected("7:00 PM", &["8:00 PM"]));
    let selection = state.selection_state().unwrap();
    assert_eq!(selection.phase, SelectionPhase::End);
    assert_eq!(selection.start_time, Some("7:00 PM".into()));
    assert_eq!(selection.slots, slots(&["8:00 PM"]));
}

// ── Store ───────────────────────────────────────────────────────────────────

#[test]
fn dispatch_updates_state() {
    let mut store = Store::new(staff());
    store.dispatch(Action::DateSelected { date: date(2017, 4, 1) });
    assert_eq!(store.state().selected_date, Some(date(2017, 4, 1)));
}

#[test]
fn subscribers_see_every_new_state() {
    let seen: Rc<RefCell<Vec<SelectionPhase>>> = Rc::default();
    let mut store = Store::new(staff());
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| sink.borrow_mut().push(state.slot_form));

    store.dispatch(Action::DateSelected { date: date(2017, 4, 1) });
    store.dispatch(start_selected("7:00 PM", &["8:00 PM"]));
    store.dispatch(end_selected("8:00 PM"));

    assert_eq!(
        *seen.borrow(),
        vec![SelectionPhase::Start, SelectionPhase::End, SelectionPhase::End]
    );
}

// ── Action wire names ───────────────────────────────────────────────────────

#[test]
fn actions_use_redux_type_names() {
    let json = serde_json::to_value(Action::DateSelected { date: date(2017, 3, 31) }).unwrap();
    assert_eq!(json["type"], "DATE_SELECTED");
    assert_eq!(json["date"], "2017-03-31");

    let json = serde_json::to_value(end_selected("8:00 AM")).unwrap();
    assert_eq!(json["type"], "TIME_SLOT_SELECTED");
    assert_eq!(json["slotTime"], "8:00 AM");
    assert_eq!(json["slotType"], "endTime");

    let json = serde_json::to_value(start_selected("7:00 AM", &["8:00 AM"])).unwrap();
    assert_eq!(json["slotType"]["startTime"]["endSlots"][0], "8:00 AM");
}
