// Example: drive paging from drag gestures and let the controller animate the snap.
use std::error::Error;

use datepager::{
    Calendar, CalendarUnit, CalendarWindow, FetchRequest, NaiveDate, NavigatorOptions,
    PageContent, ScrollDirection, SlotPosition,
};
use datepager_adapter::{Controller, Easing, HeaderFormat};

#[derive(Debug, Default)]
struct DayPage {
    request: Option<FetchRequest>,
    events: usize,
}

impl PageContent for DayPage {
    type Payload = usize;

    fn fetch_data(&mut self, request: &FetchRequest) {
        self.request = Some(request.clone());
    }

    fn populate(&mut self, payload: &usize) {
        self.events = *payload;
    }

    fn clear_content(&mut self) {
        self.events = 0;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let end = NaiveDate::from_ymd_opt(2024, 3, 15).ok_or("bad date")?;
    let window = CalendarWindow::new(end, CalendarUnit::Day, 7, Calendar::default())?;
    let format = HeaderFormat::new("%a %-d %b")
        .with_present_description("This week")
        .with_past_description("Past week");
    let mut c = Controller::new(window, NavigatorOptions::default(), format, |_| {
        DayPage::default()
    })?;
    c.set_page_extent(400.0);
    c.set_settle_animation(200, Easing::SmoothStep);

    let mut now_ms = 0u64;
    // A short drag springs back, a long one commits.
    for distance in [120.0f32, 260.0] {
        c.on_drag_start(ScrollDirection::Backward)?;
        for step in 1..=5 {
            let off = c.on_drag(distance * step as f32 / 5.0);
            println!("drag offset={off:.1}");
            now_ms += 16;
            c.tick(now_ms);
        }
        let outcome = c.on_drag_end(now_ms);
        println!("release: {outcome:?}");
        while let Some(off) = c.tick(now_ms) {
            if !c.is_animating() {
                println!("settled offset={off:.1}");
                break;
            }
            now_ms += 16;
        }
        println!("header: {} ({:?})", c.header().title(), c.header().subtitle());
    }

    // Let the debounce fire, then answer the fetch.
    now_ms += 500;
    c.tick(now_ms);
    let presented = c.navigator_mut().page_at_mut(SlotPosition::Center);
    if let Some(request) = presented.content_mut().request.take() {
        let events = request.window.len_days() as usize * 3;
        let completion = c.complete_fetch::<()>(&request, Ok(events));
        println!("fetched {}: {completion:?}", request.window);
    }
    println!("events={}", c.navigator().presented().content().events);
    Ok(())
}
