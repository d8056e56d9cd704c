//! Foreground narration audio: at most one stream per channel.
//!
//! Starting a stream always stops the previous one first. Every stream is
//! bounded by an auto-stop deadline enforced by a timer task that is
//! cancelled whenever the stream is stopped early.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const DEFAULT_AUTO_STOP: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playback {
    Idle,
    Playing {
        handle: StreamHandle,
        asset: String,
        deadline: Instant,
    },
}

/// Whatever actually makes noise
pub trait AudioSink: Send + Sync + 'static {
    fn begin(&self, handle: StreamHandle, asset: &str);
    fn end(&self, handle: StreamHandle);
}

pub struct AudioChannel<S: AudioSink> {
    sink: Arc<S>,
    playback: Arc<Mutex<Playback>>,
    timer: Option<JoinHandle<()>>,
    auto_stop: Duration,
    next_handle: u64,
}

fn lock(playback: &Mutex<Playback>) -> std::sync::MutexGuard<'_, Playback> {
    playback.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<S: AudioSink> AudioChannel<S> {
    pub fn new(sink: S, auto_stop: Duration) -> Self {
        Self {
            sink: Arc::new(sink),
            playback: Arc::new(Mutex::new(Playback::Idle)),
            timer: None,
            auto_stop,
            next_handle: 0,
        }
    }

    pub fn playback(&self) -> Playback {
        lock(&self.playback).clone()
    }

    /// A stream past its deadline counts as finished even before the timer fires
    pub fn is_playing(&self) -> bool {
        match self.playback() {
            Playback::Playing { deadline, .. } => deadline > Instant::now(),
            Playback::Idle => false,
        }
    }

    /// Must be called from within a tokio runtime
    pub fn start(&mut self, asset: &str) -> StreamHandle {
        self.stop();

        self.next_handle += 1;
        let handle = StreamHandle(self.next_handle);
        let deadline = Instant::now() + self.auto_stop;

        *lock(&self.playback) = Playback::Playing {
            handle,
            asset: asset.to_string(),
            deadline,
        };
        self.sink.begin(handle, asset);
        debug!("Audio stream {:?} started: {}", handle, asset);

        let playback = self.playback.clone();
        let sink = self.sink.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let expired = {
                let mut current = lock(&playback);
                match &*current {
                    Playback::Playing { handle: active, .. } if *active == handle => {
                        *current = Playback::Idle;
                        true
                    }
                    _ => false,
                }
            };
            if expired {
                debug!("Audio stream {:?} reached its auto-stop deadline", handle);
                sink.end(handle);
            }
        }));

        handle
    }

    /// Returns `true` if a stream was playing
    pub fn stop(&mut self) -> bool {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let previous = std::mem::replace(&mut *lock(&self.playback), Playback::Idle);
        match previous {
            Playback::Playing { handle, asset, .. } => {
                self.sink.end(handle);
                debug!("Audio stream {:?} stopped: {}", handle, asset);
                true
            }
            Playback::Idle => false,
        }
    }
}

impl<S: AudioSink> Drop for AudioChannel<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
