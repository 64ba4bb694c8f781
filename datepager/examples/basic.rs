// Example: minimal paging over months with an in-memory "backend".
use std::collections::VecDeque;
use std::error::Error;

use datepager::{
    Calendar, CalendarUnit, CalendarWindow, FetchRequest, NaiveDate, NavigatorOptions,
    PageContent, PagedNavigator, ScrollDirection, SlotPosition,
};

#[derive(Debug, Default)]
struct MonthPage {
    requests: VecDeque<FetchRequest>,
    shown: Option<String>,
}

impl PageContent for MonthPage {
    type Payload = String;

    fn fetch_data(&mut self, request: &FetchRequest) {
        self.requests.push_back(request.clone());
    }

    fn populate(&mut self, payload: &String) {
        self.shown = Some(payload.clone());
    }

    fn clear_content(&mut self) {
        self.shown = None;
    }

    fn object_to_be_cached(&self) -> Option<String> {
        self.shown.clone()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).ok_or("bad date")?;
    let window = CalendarWindow::new(today, CalendarUnit::Month, 1, Calendar::default())?;
    let mut nav = PagedNavigator::new(window, NavigatorOptions::default(), |_| {
        MonthPage::default()
    })?;

    let mut now_ms = 0u64;
    for direction in [
        ScrollDirection::Forward,
        ScrollDirection::Forward,
        ScrollDirection::Backward,
    ] {
        nav.tick(now_ms);
        let pending: Vec<FetchRequest> = nav
            .page_at_mut(SlotPosition::Center)
            .content_mut()
            .requests
            .drain(..)
            .collect();
        for request in pending {
            let payload = request.window.describe("%B %Y")?;
            let completion = nav.complete_fetch::<()>(&request, Ok(payload));
            println!("loaded {} -> {completion:?}", request.window);
        }

        now_ms += 1_000;
        let outcome = nav.request_move(direction, now_ms);
        println!("{direction:?}: {}", nav.current_window());
        if let Some(change) = outcome.page_change() {
            println!("  presented={} reused={}", change.presented, change.reused);
        }
        now_ms += 1_000;
    }

    nav.tick(now_ms);
    for slot in nav.slots() {
        println!("{slot:?}");
    }
    println!("cached windows: {}", nav.cache().len());
    Ok(())
}
