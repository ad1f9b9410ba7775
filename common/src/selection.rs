//! 画像選択のライフサイクル管理（Selection Lifecycle Manager）
//!
//! 選択中の画像と、その表示用URLを所有する。
//! URLの確保・解放は `UrlAllocator` に委譲し、差し替え・クリア・破棄のいずれでも
//! 確保したURLを必ず1回だけ解放する。

use crate::error::{Error, Result};

/// 選択された画像のバイナリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// メディアタイプが `image/` で始まるか
    pub fn is_image(&self) -> bool {
        self.media_type.to_ascii_lowercase().starts_with("image/")
    }
}

/// 選択ID（マネージャごとに単調増加）
pub type SelectionId = u64;

/// 現在の選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: SelectionId,
    pub image: ImageBlob,
    pub display_url: String,
}

/// 画像の取得経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// ファイル選択ダイアログ（accept属性で絞り込み済み）
    Picker,
    /// ドラッグ&ドロップ（任意のファイルが来うる）
    Drop,
}

/// 表示用URLの確保・解放
///
/// ブラウザではObject URL、CLIではプレビューハンドルを割り当てる
pub trait UrlAllocator {
    fn allocate(&self, image: &ImageBlob) -> String;
    fn revoke(&self, url: &str);
}

/// 選択中の画像を1つだけ保持するマネージャ
pub struct SelectionManager<A: UrlAllocator> {
    allocator: A,
    current: Option<Selection>,
    next_id: SelectionId,
}

impl<A: UrlAllocator> SelectionManager<A> {
    pub fn new(allocator: A) -> Self {
        Self {
            allocator,
            current: None,
            next_id: 1,
        }
    }

    /// 画像を選択する
    ///
    /// ドロップ経由で画像以外が来た場合は `InvalidInput` を返し、選択は変えない。
    /// 前のURLを解放してから新しいURLを確保する。
    pub fn select(&mut self, image: ImageBlob, source: SelectionSource) -> Result<&Selection> {
        if source == SelectionSource::Drop && !image.is_image() {
            log::warn!("画像以外のドロップを拒否: {} ({})", image.file_name, image.media_type);
            return Err(Error::InvalidInput(format!(
                "{} ({})",
                image.file_name, image.media_type
            )));
        }

        self.release();

        let id = self.next_id;
        self.next_id += 1;

        let display_url = self.allocator.allocate(&image);
        log::debug!("選択 #{}: {} -> {}", id, image.file_name, display_url);

        Ok(&*self.current.insert(Selection {
            id,
            image,
            display_url,
        }))
    }

    /// 選択を解除する。何も選択されていなければ何もしない
    ///
    /// 解除した場合は true
    pub fn clear(&mut self) -> bool {
        self.release()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<SelectionId> {
        self.current.as_ref().map(|s| s.id)
    }

    fn release(&mut self) -> bool {
        match self.current.take() {
            Some(selection) => {
                self.allocator.revoke(&selection.display_url);
                true
            }
            None => false,
        }
    }
}

impl<A: UrlAllocator> Drop for SelectionManager<A> {
    fn drop(&mut self) {
        self.release();
    }
}
