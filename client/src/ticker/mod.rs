use crate::State;
use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

pub mod nature;

enum Control {
    Stop,
    Interval(Duration),
}

/// Background thread that keeps stepping the shared universe until stopped.
///
/// The thread waits on its control channel between ticks, so `stop` and interval changes take
/// effect without sitting out the current interval.
pub struct TickerHost {
    control: Sender<Control>,
    handle: JoinHandle<()>,
}

impl TickerHost {
    pub fn start(
        state_arc: Arc<RwLock<State>>,
        mut interval: Duration,
        mut ticker: Box<dyn Ticker + Send>,
    ) -> Self {
        let (control, control_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            loop {
                let Ok(mut state) = state_arc.write() else {
                    eprintln!("! state lock poisoned, stopping ticker");
                    return;
                };
                ticker.tick(&mut state);
                drop(state);

                match control_receiver.recv_timeout(interval) {
                    Ok(Control::Interval(new_interval)) => interval = new_interval,
                    Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => return,
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }
        });

        Self { control, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Changes the delay between ticks. Returns false if the thread has already exited.
    pub fn set_interval(&self, interval: Duration) -> bool {
        self.control.send(Control::Interval(interval)).is_ok()
    }

    /// Stops the thread and waits for its current tick to finish. Must not be called while
    /// holding the state lock.
    pub fn stop(self) {
        let _ = self.control.send(Control::Stop);
        if self.handle.join().is_err() {
            eprintln!("! ticker thread panicked");
        }
    }
}

pub trait Ticker {
    fn tick(&mut self, state: &mut State);
}
