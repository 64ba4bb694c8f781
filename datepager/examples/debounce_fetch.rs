// Example: fast scrolling only fetches the page where motion stops.
use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use datepager::{
    Calendar, CalendarUnit, CalendarWindow, FetchRequest, NaiveDate, NavigatorOptions,
    PageContent, PagedNavigator, ScrollDirection, Weekday,
};

struct WeekPage {
    log: Rc<RefCell<Vec<FetchRequest>>>,
}

impl PageContent for WeekPage {
    type Payload = Vec<u32>;

    fn fetch_data(&mut self, request: &FetchRequest) {
        self.log.borrow_mut().push(request.clone());
    }

    fn populate(&mut self, _payload: &Vec<u32>) {}

    fn clear_content(&mut self) {}
}

fn main() -> Result<(), Box<dyn Error>> {
    let calendar = Calendar::default().with_week_start(Weekday::Sun);
    let end = NaiveDate::from_ymd_opt(2024, 3, 13).ok_or("bad date")?;
    let window = CalendarWindow::new(end, CalendarUnit::Week, 1, calendar)?;

    let log = Rc::new(RefCell::new(Vec::new()));
    let options = NavigatorOptions::default()
        .with_load_data_delay_ms(125)
        .with_on_window_change(Some(|w: &CalendarWindow| {
            let (start, last) = (w.start().format("%b %-d"), w.last_day().format("%b %-d"));
            println!("header: {start} - {last}");
        }));
    let mut nav = PagedNavigator::new(window, options, |_| WeekPage {
        log: Rc::clone(&log),
    })?;
    nav.tick(0);

    // Five moves 50 ms apart: each re-arms the settle timer before it fires.
    for now_ms in (0..=400u64).step_by(10).map(|t| t + 1_000) {
        if now_ms % 50 == 0 && now_ms <= 1_200 {
            nav.request_move(ScrollDirection::Forward, now_ms);
        }
        if nav.tick(now_ms) > 0 {
            println!("settled at {now_ms} ms");
        }
    }
    let issued = nav.tick(2_000);
    println!("issued on final tick: {issued}");

    for request in log.borrow().iter() {
        println!("fetch {} (generation {})", request.window, request.generation);
    }
    Ok(())
}
