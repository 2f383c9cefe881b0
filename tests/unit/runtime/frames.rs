use super::*;

#[tokio::test(start_paused = true)]
async fn frames_land_on_a_fixed_grid() {
    let ticker = Ticker::new(50);
    assert_eq!(ticker.period(), Duration::from_millis(20));

    let a = ticker.next_frame().await;
    let b = ticker.next_frame().await;
    let c = ticker.next_frame().await;
    assert_eq!((a, b, c), (20.0, 40.0, 60.0));
}

#[tokio::test(start_paused = true)]
async fn concurrent_waiters_share_the_frame_timestamp() {
    let ticker = Ticker::new(50);
    let (a, b) = tokio::join!(ticker.next_frame(), ticker.next_frame());
    assert_eq!(a, b);
}

#[tokio::test(start_paused = true)]
async fn late_waiters_skip_to_the_next_grid_point() {
    let ticker = Ticker::new(50);
    tokio::time::sleep(Duration::from_millis(45)).await;
    assert_eq!(ticker.next_frame().await, 60.0);
    assert_eq!(ticker.now_millis(), 60.0);
}

#[tokio::test(start_paused = true)]
async fn zero_fps_is_clamped_to_one() {
    let ticker = Ticker::new(0);
    assert_eq!(ticker.period(), Duration::from_secs(1));
}
