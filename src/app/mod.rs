//! `app` 模組是 Dexter 主控台的互動層。
//!
//! 它把鍵盤輸入轉換成對 `SessionView` 的操作，並保存純粹屬於畫面的狀態
//! （管理面板游標、彈出視窗、狀態列訊息）。資料本身都在 `console` 模組中。

// --- 子模組宣告 ---

/// `actions` 模組：執行指令面板與快捷鍵共用的 `CommandAction`。
mod actions;
/// `admin` 模組：管理面板的選取、啟用切換、新增卡片與欄位編輯。
mod admin;
/// `init` 模組：負責 `App` 結構的初始化。
mod init;
/// `keyboard` 模組：專門處理所有的鍵盤輸入事件。
mod keyboard;
/// `overlays` 模組：指令面板與輸入提示的狀態和按鍵處理。
mod overlays;
/// `state` 模組：定義了 `App` 結構以及彈出視窗的狀態類型。
mod state;

// --- 公共 API 重新導出 ---
pub use state::{
    App, CommandAction, CommandPaletteEntry, CommandPaletteState, EditTarget, InputPromptState,
    OverlayState,
};
