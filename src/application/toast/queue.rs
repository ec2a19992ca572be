//! トーストキュー
//!
//! 一時的な通知のライフサイクル：
//! 表示中 → 閉じる（`open = false`）→ 一定時間後に削除。
//!
//! 現在の一覧は `watch` チャネルに置き、任意の数のリスナーが追従できる。
//! 削除タイマーはトーストIDごとのtokioタスク。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::AppConfig;

/// トーストID（表示は10進数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub open: bool,
}

/// 新しいトーストの内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl ToastInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }
}

/// 部分更新。`None` の項目は変更しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastUpdate {
    pub id: ToastId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: Option<ToastVariant>,
    pub open: Option<bool>,
}

impl ToastUpdate {
    pub fn new(id: ToastId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            variant: None,
            open: None,
        }
    }

    fn apply(self, toast: &mut Toast) {
        if let Some(title) = self.title {
            toast.title = Some(title);
        }
        if let Some(description) = self.description {
            toast.description = Some(description);
        }
        if let Some(variant) = self.variant {
            toast.variant = variant;
        }
        if let Some(open) = self.open {
            toast.open = open;
        }
    }
}

/// 削除タイマー。世代番号で古いタイマーを見分ける。
struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Inner {
    state: watch::Sender<Vec<Toast>>,
    timers: Mutex<HashMap<ToastId, Timer>>,
    next_id: AtomicU64,
    next_generation: AtomicU64,
    limit: usize,
    remove_delay: Duration,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let timers = self.timers.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, timer) in timers.drain() {
            timer.handle.abort();
        }
    }
}

/// 上限付きのトーストキュー。cloneしたインスタンスは同じキューを共有する。
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Inner>,
}

impl ToastQueue {
    pub fn new(limit: usize, remove_delay: Duration) -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                state,
                timers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                next_generation: AtomicU64::new(0),
                limit,
                remove_delay,
            }),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.toast_limit, config.toast_remove_delay)
    }

    /// 新しいトーストを先頭に表示する。上限を超えた古いものは捨てる。
    pub fn toast(&self, input: ToastInput) -> ToastHandle {
        let id = ToastId(self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let toast = Toast {
            id,
            title: input.title,
            description: input.description,
            variant: input.variant,
            open: true,
        };
        let limit = self.inner.limit;

        self.inner.state.send_modify(|toasts| {
            toasts.insert(0, toast);
            toasts.truncate(limit);
        });
        tracing::debug!(toast_id = %id, "Toast added");

        ToastHandle {
            id,
            queue: self.clone(),
        }
    }

    /// 既存のトーストを位置を変えずに更新する
    pub fn update(&self, update: ToastUpdate) {
        self.inner.state.send_if_modified(|toasts| {
            match toasts.iter_mut().find(|t| t.id == update.id) {
                Some(toast) => {
                    update.apply(toast);
                    true
                }
                None => false,
            }
        });
    }

    /// トーストを閉じて削除を予約する（`None` ならすべて）
    pub fn dismiss(&self, id: Option<ToastId>) {
        let targets: Vec<ToastId> = self
            .inner
            .state
            .borrow()
            .iter()
            .filter(|t| id.is_none() || Some(t.id) == id)
            .map(|t| t.id)
            .collect();

        for target in &targets {
            self.schedule_removal(*target);
        }

        self.inner.state.send_if_modified(|toasts| {
            let mut changed = false;
            for toast in toasts.iter_mut().filter(|t| targets.contains(&t.id)) {
                changed |= toast.open;
                toast.open = false;
            }
            changed
        });
    }

    /// トーストを即座に削除する（`None` ならすべて）
    pub fn remove(&self, id: Option<ToastId>) {
        self.inner.state.send_if_modified(|toasts| {
            let before = toasts.len();
            match id {
                Some(id) => toasts.retain(|t| t.id != id),
                None => toasts.clear(),
            }
            toasts.len() != before
        });
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.state.borrow().clone()
    }

    /// 変更のたびに現在の一覧を受け取るリスナー
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.state.subscribe()
    }

    /// まだ発火していない削除タイマーの数
    pub fn pending_removals(&self) -> usize {
        lock_timers(&self.inner.timers)
            .values()
            .filter(|timer| !timer.handle.is_finished())
            .count()
    }

    fn schedule_removal(&self, id: ToastId) {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(toast_id = %id, "No async runtime, removing toast immediately");
            self.remove(Some(id));
            return;
        };

        let delay = self.inner.remove_delay;
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut timers = lock_timers(&self.inner.timers);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                ToastQueue { inner }.finish_removal(id, generation);
            }
        });
        if let Some(previous) = timers.insert(id, Timer { generation, handle }) {
            previous.handle.abort();
        }
        tracing::debug!(toast_id = %id, delay_ms = delay.as_millis() as u64, "Toast removal scheduled");
    }

    /// 削除タイマーの完了処理
    ///
    /// 再dismissで差し替えられた古いタイマーは何もしない。
    fn finish_removal(&self, id: ToastId, generation: u64) {
        let mut timers = lock_timers(&self.inner.timers);
        if timers.get(&id).map(|timer| timer.generation) != Some(generation) {
            return;
        }
        timers.remove(&id);
        drop(timers);

        self.remove(Some(id));
        tracing::debug!(toast_id = %id, "Toast removed");
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

fn lock_timers(
    timers: &Mutex<HashMap<ToastId, Timer>>,
) -> MutexGuard<'_, HashMap<ToastId, Timer>> {
    timers.lock().unwrap_or_else(PoisonError::into_inner)
}

/// [`ToastQueue::toast`] が返すハンドル。表示したトーストを操作する。
#[derive(Clone)]
pub struct ToastHandle {
    id: ToastId,
    queue: ToastQueue,
}

impl ToastHandle {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn dismiss(&self) {
        self.queue.dismiss(Some(self.id));
    }

    pub fn update(&self, input: ToastInput) {
        self.queue.update(ToastUpdate {
            title: input.title,
            description: input.description,
            variant: Some(input.variant),
            ..ToastUpdate::new(self.id)
        });
    }
}
