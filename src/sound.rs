use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use log::{debug, warn};
use teloxide::{prelude::*, types::InputFile};
use tokio::task::JoinHandle;

use crate::audio::{AudioChannel, AudioSink, StreamHandle};

/// The one upload a speaker may have in flight
#[derive(Default)]
struct PendingUpload(Mutex<Option<(StreamHandle, JoinHandle<()>)>>);

impl PendingUpload {
    fn track(&self, handle: StreamHandle, task: JoinHandle<()>) {
        let mut slot = self.0.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((_, previous)) = slot.replace((handle, task)) {
            previous.abort();
        }
    }

    /// Aborts the upload belonging to `handle`, if it is the tracked one
    fn cancel(&self, handle: StreamHandle) -> bool {
        let mut slot = self.0.lock().unwrap_or_else(|e| e.into_inner());
        match slot.take() {
            Some((tracked, task)) if tracked == handle => {
                task.abort();
                true
            }
            other => {
                *slot = other;
                false
            }
        }
    }
}

/// Delivers a stream to one chat as an audio message
pub struct ChatSpeaker {
    bot: Bot,
    chat: ChatId,
    assets_dir: PathBuf,
    upload: PendingUpload,
}

impl ChatSpeaker {
    pub fn new(bot: Bot, chat: ChatId, assets_dir: PathBuf) -> Self {
        Self {
            bot,
            chat,
            assets_dir,
            upload: PendingUpload::default(),
        }
    }
}

impl AudioSink for ChatSpeaker {
    fn begin(&self, handle: StreamHandle, asset: &str) {
        let bot = self.bot.clone();
        let chat = self.chat;
        let path = self.assets_dir.join(asset);
        let task = tokio::spawn(async move {
            if let Err(e) = bot.send_audio(chat, InputFile::file(&path)).await {
                warn!("Audio {:?} for chat {} failed ({}): {}", handle, chat, path.display(), e);
            }
        });
        self.upload.track(handle, task);
    }

    fn end(&self, handle: StreamHandle) {
        if self.upload.cancel(handle) {
            debug!("Audio {:?} for chat {} ended", handle, self.chat);
        }
    }
}

type SpeakerFactory<S> = Box<dyn Fn(ChatId) -> S + Send + Sync>;

/// Per-chat sound switch and audio channel
pub struct SoundDesk<S: AudioSink = ChatSpeaker> {
    channels: Mutex<HashMap<ChatId, AudioChannel<S>>>,
    enabled: Mutex<HashSet<ChatId>>,
    auto_stop: Duration,
    speaker: SpeakerFactory<S>,
}

impl<S: AudioSink> SoundDesk<S> {
    pub fn new(auto_stop: Duration, speaker: impl Fn(ChatId) -> S + Send + Sync + 'static) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            enabled: Mutex::new(HashSet::new()),
            auto_stop,
            speaker: Box::new(speaker),
        }
    }

    pub fn is_enabled(&self, chat: ChatId) -> bool {
        self.enabled
            .lock()
            .map(|enabled| enabled.contains(&chat))
            .unwrap_or(false)
    }

    /// Flips the switch; switching off silences the chat immediately
    pub fn toggle(&self, chat: ChatId) -> bool {
        let now_on = {
            let mut enabled = self.enabled.lock().unwrap_or_else(|e| e.into_inner());
            if enabled.remove(&chat) {
                false
            } else {
                enabled.insert(chat);
                true
            }
        };
        if !now_on {
            self.stop(chat);
        }
        now_on
    }

    /// Plays only when the chat has sound switched on
    pub fn play(&self, chat: ChatId, asset: &str) -> bool {
        if !self.is_enabled(chat) {
            return false;
        }
        self.play_now(chat, asset);
        true
    }

    /// Explicit playback request, regardless of the switch
    pub fn play_now(&self, chat: ChatId, asset: &str) {
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        // streams that ran out on their own leave idle channels behind
        channels.retain(|id, channel| *id == chat || channel.is_playing());
        let channel = channels
            .entry(chat)
            .or_insert_with(|| AudioChannel::new((self.speaker)(chat), self.auto_stop));
        channel.start(asset);
    }

    pub fn stop(&self, chat: ChatId) {
        let channel = self
            .channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&chat);
        if let Some(mut channel) = channel {
            channel.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::{events, Recorder};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const CHAT: ChatId = ChatId(1);
    const OTHER_CHAT: ChatId = ChatId(2);

    fn desk(recorder: &Arc<Recorder>) -> SoundDesk<Arc<Recorder>> {
        let recorder = recorder.clone();
        SoundDesk::new(Duration::from_secs(5), move |_| recorder.clone())
    }

    fn open_channels(sound: &SoundDesk<Arc<Recorder>>) -> usize {
        sound.channels.lock().unwrap().len()
    }

    #[tokio::test]
    async fn test_automatic_playback_respects_switch() {
        let recorder = Arc::new(Recorder::default());
        let sound = desk(&recorder);

        assert!(!sound.is_enabled(CHAT));
        assert!(!sound.play(CHAT, "tiger.mp3"));
        assert!(events(&recorder).is_empty());

        assert!(sound.toggle(CHAT));
        assert!(sound.play(CHAT, "tiger.mp3"));
        assert_eq!(events(&recorder), vec!["begin 1 tiger.mp3"]);
        assert!(!sound.is_enabled(OTHER_CHAT));
    }

    #[tokio::test]
    async fn test_explicit_playback_ignores_switch() {
        let recorder = Arc::new(Recorder::default());
        let sound = desk(&recorder);

        sound.play_now(CHAT, "lion.mp3");
        assert_eq!(events(&recorder), vec!["begin 1 lion.mp3"]);
    }

    #[tokio::test]
    async fn test_switching_off_stops_active_stream() {
        let recorder = Arc::new(Recorder::default());
        let sound = desk(&recorder);

        sound.toggle(CHAT);
        sound.play(CHAT, "jungle-ambient.mp3");
        assert!(!sound.toggle(CHAT));
        assert_eq!(events(&recorder), vec!["begin 1 jungle-ambient.mp3", "end 1"]);
        assert!(!sound.play(CHAT, "jungle-ambient.mp3"));
        assert_eq!(open_channels(&sound), 0);
    }

    #[tokio::test]
    async fn test_stop_releases_only_that_chat() {
        let recorder = Arc::new(Recorder::default());
        let sound = desk(&recorder);

        sound.play_now(CHAT, "tiger.mp3");
        sound.play_now(OTHER_CHAT, "lion.mp3");
        assert_eq!(open_channels(&sound), 2);

        sound.stop(CHAT);
        assert_eq!(open_channels(&sound), 1);
        assert_eq!(
            events(&recorder),
            vec!["begin 1 tiger.mp3", "begin 1 lion.mp3", "end 1"]
        );

        // stopping a silent chat is harmless
        sound.stop(CHAT);
        assert_eq!(events(&recorder).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_channels_are_pruned() {
        let recorder = Arc::new(Recorder::default());
        let sound = desk(&recorder);

        sound.play_now(CHAT, "tiger.mp3");
        tokio::time::sleep(Duration::from_secs(6)).await;
        sound.play_now(OTHER_CHAT, "lion.mp3");
        assert_eq!(open_channels(&sound), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ending_a_stream_cancels_its_upload() {
        let upload = PendingUpload::default();
        let delivered = Arc::new(AtomicBool::new(false));
        let flag = delivered.clone();
        upload.track(
            StreamHandle(1),
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                flag.store(true, Ordering::SeqCst);
            }),
        );

        assert!(!upload.cancel(StreamHandle(2)));
        assert!(upload.cancel(StreamHandle(1)));
        assert!(!upload.cancel(StreamHandle(1)));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!delivered.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_upload_replaces_previous() {
        let upload = PendingUpload::default();
        let delivered = Arc::new(AtomicBool::new(false));
        let flag = delivered.clone();
        upload.track(
            StreamHandle(1),
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                flag.store(true, Ordering::SeqCst);
            }),
        );
        upload.track(StreamHandle(2), tokio::spawn(async {}));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!delivered.load(Ordering::SeqCst));
        assert!(upload.cancel(StreamHandle(2)));
    }
}
