use crate::*;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use datepager::{
    Calendar, CalendarUnit, CalendarWindow, FetchCompletion, FetchRequest, MoveLocked,
    MoveOutcome, NavigatorOptions, PageContent, ScrollDirection, ScrollState, WindowError,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn month(y: i32, m: u32) -> CalendarWindow {
    CalendarWindow::new(d(y, m, 1), CalendarUnit::Month, 1, Calendar::default()).unwrap()
}

type FetchLog = Rc<RefCell<Vec<FetchRequest>>>;

#[derive(Debug, Default)]
struct Content {
    log: FetchLog,
    shown: Option<String>,
}

impl PageContent for Content {
    type Payload = String;

    fn fetch_data(&mut self, request: &FetchRequest) {
        self.log.borrow_mut().push(request.clone());
    }

    fn populate(&mut self, payload: &String) {
        self.shown = Some(payload.clone());
    }

    fn clear_content(&mut self) {
        self.shown = None;
    }
}

fn controller(window: CalendarWindow) -> (Controller<Content>, FetchLog) {
    let log = FetchLog::default();
    let format = HeaderFormat::new("%B %Y")
        .with_present_description("This month")
        .with_past_description("Earlier");
    let c = Controller::new(window, NavigatorOptions::default(), format, |_| Content {
        log: Rc::clone(&log),
        shown: None,
    })
    .unwrap();
    (c, log)
}

/// Ticks every 10 ms through `range`, checking the offset moves monotonically toward rest.
fn settle_monotonically(c: &mut Controller<Content>, from_ms: u64, to_ms: u64) {
    let start = c.offset();
    let mut last = start.abs();
    for now_ms in (from_ms..=to_ms).step_by(10) {
        if let Some(off) = c.tick(now_ms) {
            assert!(off.abs() <= last, "offset {off} moved away from rest");
            assert!(off * start >= 0.0, "offset {off} overshot rest");
            last = off.abs();
        }
    }
    assert!(!c.is_animating());
    assert_eq!(c.offset(), 0.0);
}

#[test]
fn easings_hit_both_endpoints() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
        let mid = easing.sample(0.5);
        assert!(mid > 0.0 && mid < 1.0);
    }
}

#[test]
fn tween_reaches_target_and_retargets_from_current_value() {
    let mut t = Tween::new(-100.0, 0.0, 0, 100, Easing::Linear);
    assert_eq!(t.sample(0), -100.0);
    assert_eq!(t.sample(50), -50.0);
    assert!(!t.is_done(99));
    assert!(t.is_done(100));
    assert_eq!(t.sample(1_000), 0.0);

    t.retarget(50, 100.0, 10);
    assert_eq!(t.from, -50.0);
    assert_eq!(t.sample(60), 100.0);

    // Zero durations are bumped so sampling never divides by zero.
    assert_eq!(Tween::new(1.0, 2.0, 0, 0, Easing::Linear).duration_ms, 1);
}

#[test]
fn header_renders_title_and_period_subtitle() {
    let format = HeaderFormat::new("%B %Y")
        .with_present_description("This month")
        .with_past_description("Earlier");
    let mut h = HeaderModel::new(format).unwrap();
    assert_eq!(h.title(), "");

    h.update_at(&month(2024, 3), d(2024, 3, 10)).unwrap();
    assert_eq!(h.title(), "March 2024");
    assert!(h.is_current_period());
    assert_eq!(h.subtitle(), Some("This month"));

    h.update_at(&month(2024, 3), d(2024, 5, 1)).unwrap();
    assert_eq!(h.subtitle(), Some("Earlier"));
    assert_eq!(h.window(), Some(&month(2024, 3)));

    h.set_scroll_state(&ScrollState {
        backward_enabled: false,
        ..ScrollState::default()
    });
    assert!(h.forward_enabled());
    assert!(!h.backward_enabled());
}

#[test]
fn header_uses_range_title_for_multi_unit_windows() {
    let mut h = HeaderModel::new(HeaderFormat::new("%d.%m")).unwrap();
    let w = CalendarWindow::new(d(2024, 3, 13), CalendarUnit::Week, 2, Calendar::default())
        .unwrap();
    h.update_at(&w, d(2024, 1, 1)).unwrap();
    assert_eq!(h.title(), "04.03 - 17.03");
    assert_eq!(h.subtitle(), None);
}

#[test]
fn header_rejects_unparseable_format() {
    assert!(matches!(
        HeaderModel::new(HeaderFormat::new("%Q")),
        Err(WindowError::InvalidFormat(_))
    ));
}

#[test]
fn drag_past_threshold_commits_and_settles() {
    let (mut c, _log) = controller(month(2024, 3));
    c.set_page_extent(300.0);
    assert_eq!(c.header().title(), "March 2024");

    c.on_drag_start(ScrollDirection::Forward).unwrap();
    assert_eq!(c.on_drag(200.0), 200.0);
    let outcome = c.on_drag_end(0);
    assert!(outcome.is_moved());
    assert_eq!(*c.navigator().current_window(), month(2024, 4));
    assert_eq!(c.header().title(), "April 2024");

    // The new center page still has the undragged remainder to travel.
    assert_eq!(c.offset(), -100.0);
    assert!(c.is_animating());
    settle_monotonically(&mut c, 10, 400);
}

#[test]
fn short_drag_cancels_and_springs_back() {
    let (mut c, _log) = controller(month(2024, 3));
    c.set_page_extent(300.0);

    c.on_drag_start(ScrollDirection::Backward).unwrap();
    assert_eq!(c.on_drag(100.0), -100.0);
    assert_eq!(
        c.on_drag_end(0),
        MoveOutcome::Cancelled {
            direction: ScrollDirection::Backward
        }
    );
    assert_eq!(*c.navigator().current_window(), month(2024, 3));
    assert_eq!(c.offset(), -100.0);
    settle_monotonically(&mut c, 10, 400);
}

#[test]
fn drag_toward_minimum_is_resisted() {
    let (mut c, _log) = controller(month(2006, 1));
    assert!(!c.header().backward_enabled());

    c.on_drag_start(ScrollDirection::Backward).unwrap();
    assert_eq!(c.on_drag(90.0), -20.0);
    assert!(matches!(
        c.on_drag_end(0),
        MoveOutcome::RubberBand {
            direction: ScrollDirection::Backward,
            ..
        }
    ));
    assert_eq!(*c.navigator().current_window(), month(2006, 1));
    settle_monotonically(&mut c, 10, 400);

    // A button tap at the boundary bounces by the largest resisted offset.
    c.scroll(ScrollDirection::Backward, 1_000);
    assert_eq!(c.offset(), -20.0);
    settle_monotonically(&mut c, 1_010, 1_400);
}

#[test]
fn scroll_animates_a_full_page_and_fetches_after_settle() {
    let (mut c, log) = controller(month(2024, 3));
    let outcome = c.scroll(ScrollDirection::Forward, 0);
    assert!(outcome.is_moved());
    assert_eq!(c.offset(), -c.page_extent());

    settle_monotonically(&mut c, 0, 300);
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].window, month(2024, 4));
}

#[test]
fn new_drag_interrupts_settle_animation() {
    let (mut c, _log) = controller(month(2024, 3));
    c.scroll(ScrollDirection::Forward, 0);
    let mid = c.tick(50).unwrap();
    assert!(mid < 0.0);

    c.on_drag_start(ScrollDirection::Forward).unwrap();
    assert!(!c.is_animating());
    assert!(c.is_dragging());
    assert_eq!(c.offset(), mid);
    assert_eq!(
        c.on_drag_start(ScrollDirection::Backward),
        Err(MoveLocked {
            active: ScrollDirection::Forward
        })
    );
}

#[test]
fn jump_to_resets_offset_and_header() {
    let (mut c, _log) = controller(month(2024, 3));
    c.scroll(ScrollDirection::Forward, 0);
    c.jump_to(month(2030, 1), 10).unwrap();
    assert!(!c.is_animating());
    assert_eq!(c.offset(), 0.0);
    assert_eq!(c.header().title(), "January 2030");
    assert_eq!(c.header().subtitle(), Some("Earlier"));
}

#[test]
fn example_controller_drag_smoke() {
    let (mut c, log) = controller(month(2024, 1));
    c.set_commit_fraction(0.25);
    let mut now_ms = 0u64;
    for _ in 0..4 {
        c.on_drag_start(ScrollDirection::Forward).unwrap();
        for step in 1..=10 {
            c.on_drag(step as f32 * 10.0);
            now_ms += 16;
            c.tick(now_ms);
        }
        c.on_drag_end(now_ms);
        for _ in 0..30 {
            now_ms += 16;
            c.tick(now_ms);
        }
        let pending: Vec<FetchRequest> = log.borrow_mut().drain(..).collect();
        for request in pending {
            let payload = request.window.describe("%B").unwrap();
            assert_eq!(
                c.complete_fetch::<()>(&request, Ok(payload)),
                FetchCompletion::Applied
            );
        }
    }
    assert_eq!(*c.navigator().current_window(), month(2024, 5));
    assert_eq!(
        c.navigator().presented().content().shown.as_deref(),
        Some("May")
    );
}
