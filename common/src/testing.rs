//! テスト用の差し替え実装

use crate::error::{Error, Result};
use crate::orchestrator::{HttpReply, PredictRequest, Transport};
use crate::selection::{ImageBlob, UrlAllocator};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocatorEvent {
    Allocate(String),
    Revoke(String),
}

/// 確保・解放を記録するアロケータ（クローンは記録を共有する）
#[derive(Debug, Clone, Default)]
pub struct RecordingAllocator {
    events: Rc<RefCell<Vec<AllocatorEvent>>>,
    counter: Rc<RefCell<u64>>,
}

impl RecordingAllocator {
    pub fn events(&self) -> Vec<AllocatorEvent> {
        self.events.borrow().clone()
    }

    pub fn revocations_of(&self, url: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, AllocatorEvent::Revoke(u) if u == url))
            .count()
    }

    /// 確保済みで未解放のURL
    pub fn live(&self) -> Vec<String> {
        let mut live = Vec::new();
        for event in self.events.borrow().iter() {
            match event {
                AllocatorEvent::Allocate(url) => live.push(url.clone()),
                AllocatorEvent::Revoke(url) => live.retain(|u| u != url),
            }
        }
        live
    }
}

impl UrlAllocator for RecordingAllocator {
    fn allocate(&self, _image: &ImageBlob) -> String {
        let mut counter = self.counter.borrow_mut();
        *counter += 1;
        let url = format!("mem://{}", *counter);
        self.events.borrow_mut().push(AllocatorEvent::Allocate(url.clone()));
        url
    }

    fn revoke(&self, url: &str) {
        self.events.borrow_mut().push(AllocatorEvent::Revoke(url.to_string()));
    }
}

/// 事前に用意した応答を順に返すトランスポート
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpReply>>>>,
    sent: Rc<RefCell<Vec<PredictRequest>>>,
}

impl ScriptedTransport {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpReply {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(Error::Transport(message.to_string())));
        self
    }

    pub fn sent(&self) -> Vec<PredictRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &PredictRequest) -> Result<HttpReply> {
        self.sent.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("no scripted reply".to_string())))
    }
}
