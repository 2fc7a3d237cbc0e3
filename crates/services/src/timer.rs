use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Once-a-second ticker for timed runs.
///
/// Each tick yields the elapsed time to feed into `QuizLoopService::tick`.
/// The background task is aborted when the timer is dropped, so no tick
/// outlives the run it was started for.
#[derive(Debug)]
pub struct CountdownTimer {
    period: std::time::Duration,
    ticks: mpsc::Receiver<()>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Start ticking every second. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start() -> Self {
        Self::with_period(std::time::Duration::from_secs(1))
    }

    #[must_use]
    pub fn with_period(period: std::time::Duration) -> Self {
        let (tx, ticks) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self {
            period,
            ticks,
            task,
        }
    }

    /// Wait for the next tick. `None` once the timer has been stopped.
    pub async fn next_tick(&mut self) -> Option<chrono::Duration> {
        self.ticks.recv().await?;
        chrono::Duration::from_std(self.period).ok()
    }

    /// Stop ticking; pending ticks are discarded.
    pub fn stop(&mut self) {
        self.task.abort();
        self.ticks.close();
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut timer = CountdownTimer::start();
        let started = Instant::now();
        assert_eq!(timer.next_tick().await, Some(chrono::Duration::seconds(1)));
        assert_eq!(timer.next_tick().await, Some(chrono::Duration::seconds(1)));
        assert!(started.elapsed() >= std::time::Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_timer_yields_nothing() {
        let mut timer = CountdownTimer::start();
        timer.stop();
        assert_eq!(timer.next_tick().await, None);
    }
}
