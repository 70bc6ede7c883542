#![cfg(feature = "tokio-scheduler")]

use crucible_box::*;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::{timeout, Instant};

fn animated_width(width: u16) -> BoxProps {
    BoxProps::new(Styles::new().width(width)).transition_size(true)
}

#[tokio::test(start_paused = true)]
async fn ticks_arrive_once_per_interval() {
    let (scheduler, mut rx) = TokioScheduler::new();
    let scheduler = Rc::new(scheduler);
    let mut instance = BoxInstance::mount(scheduler.clone());

    instance.render(&animated_width(0), Vec::<Node>::new(), None);
    instance.render(&animated_width(3), Vec::<Node>::new(), None);

    let started = Instant::now();
    for _ in 0..3 {
        let TimerFired(id) = rx.recv().await.expect("scheduler alive");
        assert!(instance.handle_timer(id));
    }

    let elapsed = started.elapsed();
    assert!(elapsed >= TICK_INTERVAL * 3 && elapsed < TICK_INTERVAL * 4);
    assert_eq!(instance.displayed().unwrap().displayed_width, Some(3));
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_ticks() {
    let (scheduler, mut rx) = TokioScheduler::new();
    let scheduler = Rc::new(scheduler);
    let mut instance = BoxInstance::mount(scheduler.clone());
    instance.render(&animated_width(0), Vec::<Node>::new(), None);
    instance.render(&animated_width(20), Vec::<Node>::new(), None);

    let TimerFired(id) = rx.recv().await.expect("first tick");
    instance.handle_timer(id);
    instance.unmount();

    assert_eq!(scheduler.active_timers(), 0);
    assert!(timeout(Duration::from_secs(2), rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn disabling_transition_clears_interval() {
    let (scheduler, mut rx) = TokioScheduler::new();
    let scheduler = Rc::new(scheduler);
    let mut instance = BoxInstance::mount(scheduler.clone());

    instance.render(&animated_width(5), Vec::<Node>::new(), None);
    assert_eq!(scheduler.active_timers(), 1);

    instance.render(&BoxProps::new(Styles::new().width(5)), Vec::<Node>::new(), None);

    assert_eq!(scheduler.active_timers(), 0);
    assert!(timeout(TICK_INTERVAL * 5, rx.recv()).await.is_err());
}
