//! 画面状態の管理（View Controller）
//!
//! 利用者の操作（選択・モード切替・解析・クリア）を状態遷移に変換する。
//! 遷移のたびに `snapshot()` でオーバーレイを含む表示用データを導出し直す。

use crate::error::Result;
use crate::geometry::{derive_overlay, DisplayGeometry, DisplayRegion};
use crate::i18n::Language;
use crate::orchestrator::{failure_message, prepare, settle, HttpReply, PredictRequest, RequestState, Transport};
use crate::selection::{ImageBlob, Selection, SelectionId, SelectionManager, SelectionSource, UrlAllocator};
use crate::types::AnalysisMode;

/// 送信中リクエストの識別子
///
/// 応答が戻った時点で、送信時の選択・リクエストと一致するかの照合に使う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictTicket {
    pub selection_id: SelectionId,
    pub request_id: u64,
    pub mode: AnalysisMode,
}

/// `begin_predict` が返す、送信すべき内容
#[derive(Debug, Clone)]
pub struct PendingPredict {
    pub ticket: PredictTicket,
    pub request: PredictRequest,
}

/// 描画用の状態一式
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub mode: AnalysisMode,
    pub language: Language,
    pub display_url: Option<String>,
    pub file_name: Option<String>,
    pub request_state: RequestState,
    pub overlay: Option<DisplayRegion>,
    pub can_predict: bool,
}

pub struct ViewController<A: UrlAllocator> {
    selection: SelectionManager<A>,
    mode: AnalysisMode,
    language: Language,
    request_state: RequestState,
    geometry: Option<DisplayGeometry>,
    in_flight: Option<PredictTicket>,
    next_request_id: u64,
}

impl<A: UrlAllocator> ViewController<A> {
    pub fn new(allocator: A, mode: AnalysisMode, language: Language) -> Self {
        Self {
            selection: SelectionManager::new(allocator),
            mode,
            language,
            request_state: RequestState::Idle,
            geometry: None,
            in_flight: None,
            next_request_id: 1,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn request_state(&self) -> &RequestState {
        &self.request_state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.current()
    }

    pub fn geometry(&self) -> Option<&DisplayGeometry> {
        self.geometry.as_ref()
    }

    /// 画像を選択し、前回の結果と画像寸法を破棄する
    ///
    /// 拒否された場合（ドロップされた非画像）は何も変えずに `Err` を返す
    pub fn select(&mut self, image: ImageBlob, source: SelectionSource) -> Result<()> {
        self.selection.select(image, source)?;
        self.reset();
        Ok(())
    }

    /// 選択を解除する（何度呼んでも同じ状態になる）
    pub fn clear(&mut self) {
        self.selection.clear();
        self.reset();
    }

    /// モードを設定し、変わった場合は前回の結果を破棄する
    ///
    /// 解析中は変更しない
    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if self.mode == mode {
            return;
        }
        if self.request_state.is_loading() {
            log::debug!("解析中のためモード切替を拒否: {}", mode);
            return;
        }
        log::debug!("モード切替: {} -> {}", self.mode, mode);
        self.mode = mode;
        self.request_state = RequestState::Idle;
        self.in_flight = None;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// 言語を設定する（表示中の結果は保持）
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// 画像の読み込み完了・リサイズ時の寸法を記録する
    pub fn capture_geometry(&mut self, geometry: DisplayGeometry) {
        if self.selection.current().is_none() {
            log::debug!("選択がないため寸法を無視");
            return;
        }
        self.geometry = Some(geometry);
    }

    pub fn can_predict(&self) -> bool {
        self.selection.current().is_some() && !self.request_state.is_loading()
    }

    /// 解析を開始する
    ///
    /// 送信中、または未選択の場合は `None`。
    /// 未選択の場合は状態を `Failed` にする。
    pub fn begin_predict(&mut self) -> Option<PendingPredict> {
        if self.request_state.is_loading() {
            log::debug!("解析中のため再実行を拒否");
            return None;
        }

        let request = match prepare(self.selection.current(), self.mode, self.language) {
            Ok(request) => request,
            Err(e) => {
                self.request_state = RequestState::Failed(failure_message(&e, self.language));
                return None;
            }
        };

        let selection_id = self.selection.current_id()?;
        let ticket = PredictTicket {
            selection_id,
            request_id: self.next_request_id,
            mode: self.mode,
        };
        self.next_request_id += 1;

        self.in_flight = Some(ticket);
        self.request_state = RequestState::Loading;
        Some(PendingPredict { ticket, request })
    }

    /// 応答を反映する
    ///
    /// 送信後に選択・モードが変わっていた場合は破棄して false を返す
    pub fn finish_predict(&mut self, ticket: PredictTicket, reply: Result<HttpReply>) -> bool {
        let is_current = self.in_flight == Some(ticket)
            && self.selection.current_id() == Some(ticket.selection_id);

        if !is_current {
            log::debug!(
                "古い応答を破棄: selection #{} request #{}",
                ticket.selection_id,
                ticket.request_id
            );
            return false;
        }

        self.in_flight = None;
        self.request_state = settle(ticket.mode, self.language, reply);
        true
    }

    /// 開始・送信・反映をまとめて行う
    pub async fn predict<T: Transport>(&mut self, transport: &T) -> &RequestState {
        if let Some(pending) = self.begin_predict() {
            let reply = transport.send(&pending.request).await;
            self.finish_predict(pending.ticket, reply);
        }
        &self.request_state
    }

    pub fn overlay(&self) -> Option<DisplayRegion> {
        derive_overlay(self.mode, &self.request_state, self.geometry.as_ref())
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let current = self.selection.current();
        ViewSnapshot {
            mode: self.mode,
            language: self.language,
            display_url: current.map(|s| s.display_url.clone()),
            file_name: current.map(|s| s.image.file_name.clone()),
            request_state: self.request_state.clone(),
            overlay: self.overlay(),
            can_predict: self.can_predict(),
        }
    }

    fn reset(&mut self) {
        self.request_state = RequestState::Idle;
        self.geometry = None;
        self.in_flight = None;
    }
}
