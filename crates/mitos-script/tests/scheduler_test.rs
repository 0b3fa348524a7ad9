// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end scheduling behavior: ordering, timed and predicate waits,
//! nesting, and deferred cancellation.

use mitos_script::{CoroutineScheduler, Suspension, TickContext};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Routine that records its steps in a shared journal and finishes after
/// `steps` steps.
fn step_recorder(
    label: &'static str,
    steps: usize,
    journal: Rc<RefCell<Vec<String>>>,
) -> impl FnMut(&mut TickContext<'_>) -> Result<Suspension, mitos_script::ScriptError> {
    let mut taken = 0;
    move |_| {
        taken += 1;
        journal.borrow_mut().push(format!("{label}{taken}"));
        Ok(if taken < steps {
            Suspension::Continue
        } else {
            Suspension::Done
        })
    }
}

#[test]
fn wait_for_seconds_releases_once_cumulative_time_is_reached() {
    // --- 1. ARRANGE ---
    let mut scheduler = CoroutineScheduler::new();
    let mut step = 0;
    let handle = scheduler.start(move |_: &mut TickContext<'_>| {
        step += 1;
        Ok(match step {
            1 => Suspension::wait_seconds(1.0),
            _ => Suspension::Done,
        })
    });

    // --- 2. ACT / ASSERT ---
    // Three ticks of 0.4s each: cumulative time crosses 1.0 on the third.
    scheduler.tick(0.4);
    assert!(scheduler.is_active(handle), "still waiting after tick 1");
    scheduler.tick(0.4);
    assert!(scheduler.is_active(handle), "still waiting after tick 2");
    scheduler.tick(0.4);
    assert!(!scheduler.is_active(handle), "released and finished on tick 3");
}

#[test]
fn predicate_waits_are_evaluated_fresh_every_tick() {
    let mut scheduler = CoroutineScheduler::new();
    let gate = Rc::new(Cell::new(false));
    let evaluations = Rc::new(Cell::new(0));

    let gate_for_wait = gate.clone();
    let evaluations_for_wait = evaluations.clone();
    let mut step = 0;
    let handle = scheduler.start(move |_: &mut TickContext<'_>| {
        step += 1;
        let gate = gate_for_wait.clone();
        let evaluations = evaluations_for_wait.clone();
        Ok(match step {
            1 => Suspension::wait_until(move || {
                evaluations.set(evaluations.get() + 1);
                gate.get()
            }),
            _ => Suspension::Done,
        })
    });

    // The condition is consulted on the yielding tick and every tick after.
    scheduler.tick(0.016);
    scheduler.tick(0.016);
    assert_eq!(evaluations.get(), 2);
    assert!(scheduler.is_active(handle));

    // Flipping the gate releases the wait on the next tick; one final
    // evaluation, then the routine finishes.
    gate.set(true);
    scheduler.tick(0.016);
    assert_eq!(evaluations.get(), 3);
    assert!(!scheduler.is_active(handle));
}

#[test]
fn wait_while_holds_until_predicate_turns_false() {
    let mut scheduler = CoroutineScheduler::new();
    let busy = Rc::new(Cell::new(true));

    let busy_for_wait = busy.clone();
    let mut step = 0;
    let handle = scheduler.start(move |_: &mut TickContext<'_>| {
        step += 1;
        let busy = busy_for_wait.clone();
        Ok(match step {
            1 => Suspension::wait_while(move || busy.get()),
            _ => Suspension::Done,
        })
    });

    scheduler.tick(0.016);
    scheduler.tick(0.016);
    assert!(scheduler.is_active(handle));

    busy.set(false);
    scheduler.tick(0.016);
    assert!(!scheduler.is_active(handle));
}

#[test]
fn nested_coroutine_suspends_the_outer_until_it_finishes() {
    // --- 1. ARRANGE ---
    let journal = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = CoroutineScheduler::new();

    let inner = step_recorder("inner", 2, journal.clone());
    let journal_for_outer = journal.clone();
    let mut inner_slot = Some(inner);
    let mut step = 0;
    let handle = scheduler.start(move |_: &mut TickContext<'_>| {
        step += 1;
        Ok(match step {
            1 => {
                journal_for_outer.borrow_mut().push("outer1".into());
                Suspension::nested(inner_slot.take().expect("yielded once"))
            }
            _ => {
                journal_for_outer.borrow_mut().push("outer2".into());
                Suspension::Done
            }
        })
    });

    // --- 2. ACT ---
    // Tick 1: outer yields the child. Ticks 2-3: child steps; on its
    // finishing tick the outer resumes in the same pass and completes.
    scheduler.tick(0.016);
    scheduler.tick(0.016);
    assert!(scheduler.is_active(handle));
    scheduler.tick(0.016);

    // --- 3. ASSERT ---
    assert_eq!(
        *journal.borrow(),
        vec!["outer1", "inner1", "inner2", "outer2"]
    );
    assert!(!scheduler.is_active(handle));
}

#[test]
fn coroutine_started_mid_tick_first_advances_next_tick() {
    // --- 1. ARRANGE ---
    let journal = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut scheduler = CoroutineScheduler::new();

    let journal_for_spawner = journal.clone();
    let mut step = 0;
    scheduler.start(move |ctx: &mut TickContext<'_>| {
        step += 1;
        if step == 1 {
            journal_for_spawner.borrow_mut().push("spawner".into());
            let child_journal = journal_for_spawner.clone();
            ctx.start(move |_: &mut TickContext<'_>| {
                child_journal.borrow_mut().push("child".into());
                Ok(Suspension::Done)
            });
        }
        Ok(if step < 2 {
            Suspension::Continue
        } else {
            Suspension::Done
        })
    });

    // --- 2. ACT / ASSERT ---
    scheduler.tick(0.016);
    assert_eq!(*journal.borrow(), vec!["spawner"], "child absent at tick 1");
    assert_eq!(scheduler.len(), 2, "child joined the active set");

    scheduler.tick(0.016);
    assert_eq!(*journal.borrow(), vec!["spawner", "child"]);
    assert!(scheduler.is_empty());
}

#[test]
fn stop_issued_mid_tick_keeps_that_ticks_progress_but_no_more() {
    // --- 1. ARRANGE ---
    // "victim" is started first so it advances before "stopper" runs.
    let journal = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = CoroutineScheduler::new();
    let victim = scheduler.start(step_recorder("victim", 5, journal.clone()));

    let mut stopper_step = 0;
    scheduler.start(move |ctx: &mut TickContext<'_>| {
        stopper_step += 1;
        if stopper_step == 2 {
            ctx.stop(victim);
            return Ok(Suspension::Done);
        }
        Ok(Suspension::Continue)
    });

    // --- 2. ACT ---
    scheduler.tick(0.016); // victim1; stopper idles
    scheduler.tick(0.016); // victim2 (already in flight), then stop lands
    scheduler.tick(0.016); // victim must not advance again

    // --- 3. ASSERT ---
    assert_eq!(*journal.borrow(), vec!["victim1", "victim2"]);
    assert!(!scheduler.is_active(victim));
}

#[test]
fn stop_all_empties_the_active_set_by_end_of_tick() {
    // --- 1. ARRANGE ---
    let journal = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = CoroutineScheduler::new();
    scheduler.start(step_recorder("a", 10, journal.clone()));
    scheduler.start(step_recorder("b", 10, journal.clone()));
    scheduler.start(step_recorder("c", 10, journal.clone()));
    assert_eq!(scheduler.len(), 3);

    // --- 2. ACT ---
    scheduler.stop_all();
    scheduler.tick(0.016);

    // --- 3. ASSERT ---
    assert!(scheduler.is_empty());
    assert!(journal.borrow().is_empty(), "no coroutine advanced after the stop");
}

#[test]
fn stop_all_issued_mid_tick_cancels_the_rest_of_the_set() {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = CoroutineScheduler::new();

    scheduler.start(step_recorder("a", 10, journal.clone()));
    scheduler.start({
        let mut fired = false;
        move |ctx: &mut TickContext<'_>| {
            if !fired {
                fired = true;
                ctx.stop_all();
            }
            Ok(Suspension::Continue)
        }
    });
    scheduler.start(step_recorder("c", 10, journal.clone()));

    scheduler.tick(0.016);

    // Cancellation is deferred: "c" still took its in-flight step this
    // tick, but the whole set is gone afterwards.
    assert_eq!(*journal.borrow(), vec!["a1", "c1"]);
    assert!(scheduler.is_empty());
}

#[test]
fn survivors_keep_insertion_order_across_mixed_lifetimes() {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = CoroutineScheduler::new();
    scheduler.start(step_recorder("a", 3, journal.clone()));
    scheduler.start(step_recorder("b", 1, journal.clone()));
    scheduler.start(step_recorder("c", 3, journal.clone()));

    scheduler.tick(0.016);
    scheduler.tick(0.016);

    assert_eq!(
        *journal.borrow(),
        vec!["a1", "b1", "c1", "a2", "c2"],
        "b finished after one step; a and c keep their relative order"
    );
}

#[test]
fn chained_waits_each_consume_their_own_time() {
    // A routine that waits twice in a row: 0.5s, then 0.3s.
    let mut scheduler = CoroutineScheduler::new();
    let mut step = 0;
    let handle = scheduler.start(move |_: &mut TickContext<'_>| {
        step += 1;
        Ok(match step {
            1 => Suspension::wait_seconds(0.5),
            2 => Suspension::wait_seconds(0.3),
            _ => Suspension::Done,
        })
    });

    scheduler.tick(0.3); // first wait keeps 0.2s
    scheduler.tick(0.3); // first wait releases; step 2 yields the second wait
    assert!(scheduler.is_active(handle));
    scheduler.tick(0.3); // second wait exhausted; final step completes
    assert!(!scheduler.is_active(handle));
}
