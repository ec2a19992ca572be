use futures::stream::{self, BoxStream, StreamExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::adapters::system::{SystemClock, UuidIdGenerator};
use crate::domain::booking::{self, Booking, ValidatedBooking};
use crate::domain::{BookingAdded, BookingDeleted, BookingId, DomainEvent, SelectionChanged};
use crate::ports::{Clock, IdGenerator};

use super::errors::BookingStoreError;

/// 変更通知チャネルの容量
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 重複IDを引いたときの再採番回数の上限
const MAX_ID_ATTEMPTS: usize = 8;

/// 画面層と共有するストア
pub type SharedBookingStore = Arc<Mutex<BookingStore>>;

/// 共有ストアのロックを取得する
///
/// 他のスレッドがロック中にpanicしても、保持している状態はそのまま使う。
pub fn lock_store(store: &SharedBookingStore) -> MutexGuard<'_, BookingStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 予約ストア
///
/// 予約の一覧（登録順）と選択中の予約IDを保持する。
/// グローバル状態ではなく明示的に所有される値なので、
/// 独立したインスタンスをいくつでも作れる。
///
/// 変更はすべて同期的に行い、`subscribe()` の購読者へ `DomainEvent` を配信する。
pub struct BookingStore {
    bookings: Vec<Booking>,
    selected_booking_id: Option<BookingId>,
    clock: Arc<dyn Clock>,
    id_generator: Arc<dyn IdGenerator>,
    events: broadcast::Sender<DomainEvent>,
}

impl BookingStore {
    pub fn new(clock: Arc<dyn Clock>, id_generator: Arc<dyn IdGenerator>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            bookings: Vec::new(),
            selected_booking_id: None,
            clock,
            id_generator,
            events,
        }
    }

    pub fn into_shared(self) -> SharedBookingStore {
        Arc::new(Mutex::new(self))
    }

    // ========================================================================
    // 変更操作
    // ========================================================================

    /// 予約を追加する
    ///
    /// - IDと作成時刻を採番し、一覧の末尾に追加する（並べ替えない）
    /// - 追加した予約を選択状態にする
    ///
    /// 入力は検証済みの型でしか受け取らない。
    ///
    /// # エラー
    /// 採番器が既存IDを返し続けた場合のみ `IdCollision`
    pub fn add_booking(&mut self, input: ValidatedBooking) -> Result<BookingId, BookingStoreError> {
        let id = self.unused_id()?;
        let created_at = self.clock.now_millis();
        let booking = booking::create_booking(input, id, created_at);

        tracing::debug!(booking_id = %id, created_at, "Booking added");

        self.bookings.push(booking.clone());
        self.selected_booking_id = Some(id);

        self.publish(DomainEvent::BookingAdded(BookingAdded { booking }));
        self.publish_selection();

        Ok(id)
    }

    /// 予約を削除する
    ///
    /// - 存在しないIDは何もしない（エラーではない）
    /// - 選択中の予約を削除した場合、残った先頭の予約（登録順）を選択する。
    ///   残りが無ければ選択なし
    /// - 別の予約が選択中なら選択は変わらない
    ///
    /// # 戻り値
    /// 削除した予約
    pub fn delete_booking(&mut self, id: BookingId) -> Option<Booking> {
        let position = self.bookings.iter().position(|b| b.id == id)?;
        let removed = self.bookings.remove(position);

        tracing::debug!(booking_id = %id, remaining = self.bookings.len(), "Booking deleted");
        self.publish(DomainEvent::BookingDeleted(BookingDeleted { booking_id: id }));

        if self.selected_booking_id == Some(id) {
            self.selected_booking_id = self.bookings.first().map(|b| b.id);
            self.publish_selection();
        }

        Some(removed)
    }

    /// 予約を選択する
    ///
    /// 存在確認はしない。存在しないIDを選ぶと `selected_booking()` が `None` になる。
    pub fn select_booking(&mut self, id: BookingId) {
        tracing::debug!(booking_id = %id, "Booking selected");
        self.selected_booking_id = Some(id);
        self.publish_selection();
    }

    // ========================================================================
    // 参照
    // ========================================================================

    /// 登録順の予約一覧
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn selected_booking_id(&self) -> Option<BookingId> {
        self.selected_booking_id
    }

    /// 選択中の予約（選択IDに該当する予約が無ければ `None`）
    pub fn selected_booking(&self) -> Option<&Booking> {
        self.selected_booking_id.and_then(|id| self.find(id))
    }

    pub fn find(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// 一覧表示順（チェックイン日昇順、同日は新しい順）
    ///
    /// 呼び出すたびに並べ直す。保持順は変えない。
    pub fn sorted_bookings(&self) -> Vec<&Booking> {
        booking::sort_for_listing(&self.bookings)
    }

    // ========================================================================
    // 変更通知
    // ========================================================================

    /// 変更イベントを購読する
    ///
    /// 受信側をdropすれば購読解除になる。
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// 変更イベントをストリームとして購読する
    pub fn events(&self) -> BoxStream<'static, DomainEvent> {
        stream::unfold(self.events.subscribe(), |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((event, receiver)),
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!("Store subscriber lagged, {} events missed", count);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }

    fn publish(&self, event: DomainEvent) {
        // 購読者がいなければ送信は失敗するが、それで問題ない
        let _ = self.events.send(event);
    }

    fn publish_selection(&self) {
        self.publish(DomainEvent::SelectionChanged(SelectionChanged {
            selected_booking_id: self.selected_booking_id,
        }));
    }

    fn unused_id(&self) -> Result<BookingId, BookingStoreError> {
        let mut id = self.id_generator.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if self.find(id).is_none() {
                return Ok(id);
            }
            tracing::warn!(booking_id = %id, "Generated booking id already in use");
            id = self.id_generator.next_id();
        }
        if self.find(id).is_none() {
            return Ok(id);
        }
        Err(BookingStoreError::IdCollision(id))
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidIdGenerator))
    }
}
