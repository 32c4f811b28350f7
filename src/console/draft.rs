/// 對話輸入框的草稿緩衝區。
///
/// 管理文字內容、游標位置（位元組偏移）與已送出草稿的歷史紀錄。
#[derive(Debug, Clone, Default)]
pub struct DraftComposer {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_index: Option<usize>,
    /// 開始瀏覽歷史前尚未送出的草稿。
    stash: Option<String>,
}

impl DraftComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// 以指定文字取代整個草稿，游標移到結尾。
    #[cfg(test)]
    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
        self.history_index = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.history_index = None;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.drain(idx..self.cursor);
            self.cursor = idx;
            self.history_index = None;
        }
    }

    pub fn delete(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            let end = self.cursor + ch.len_utf8();
            self.buffer.drain(self.cursor..end);
            self.history_index = None;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor = self.buffer[..self.cursor]
            .rfind('\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor = self.buffer[self.cursor..]
            .find('\n')
            .map(|pos| self.cursor + pos)
            .unwrap_or(self.buffer.len());
    }

    /// 取出草稿內容並清空緩衝區；非空白內容會記入歷史。
    pub fn take(&mut self) -> String {
        let content = std::mem::take(&mut self.buffer);
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.cursor = 0;
        self.history_index = None;
        self.stash = None;
        content
    }

    /// 載入上一筆歷史草稿。
    pub fn history_previous(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let target = match self.history_index {
            Some(idx) => idx.saturating_sub(1),
            None => {
                self.stash = Some(self.buffer.clone());
                self.history.len() - 1
            }
        };
        self.load_history(target)
    }

    /// 載入下一筆歷史草稿；走過最後一筆時還原瀏覽前的草稿。
    pub fn history_next(&mut self) -> bool {
        match self.history_index {
            Some(idx) if idx + 1 < self.history.len() => self.load_history(idx + 1),
            Some(_) => {
                self.history_index = None;
                self.buffer = self.stash.take().unwrap_or_default();
                self.cursor = self.buffer.len();
                true
            }
            None => false,
        }
    }

    fn load_history(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.get(index).cloned() else {
            return false;
        };
        self.buffer = entry;
        self.cursor = self.buffer.len();
        self.history_index = Some(index);
        true
    }

    /// 計算游標在指定寬度下的顯示位置 (欄, 列)。
    pub fn cursor_display_position(&self, width: usize) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let mut col = 0usize;
        let mut row = 0usize;
        for ch in self.buffer[..self.cursor].chars() {
            if ch == '\n' {
                row += 1;
                col = 0;
                continue;
            }
            let char_width = unicode_width::UnicodeWidthChar::width(ch)
                .unwrap_or(1)
                .max(1);
            if col + char_width > width {
                row += 1;
                col = 0;
            }
            col += char_width;
        }
        (col as u16, row as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_multibyte_characters() {
        let mut draft = DraftComposer::new();
        for ch in "P/E 比率".chars() {
            draft.insert_char(ch);
        }
        draft.backspace();
        draft.move_left();
        draft.insert_char('x');
        assert_eq!(draft.buffer(), "P/E x比");
        draft.delete();
        assert_eq!(draft.buffer(), "P/E x");
    }

    #[test]
    fn take_clears_and_records_history() {
        let mut draft = DraftComposer::new();
        draft.set("first question");
        assert_eq!(draft.take(), "first question");
        assert!(draft.is_empty());

        draft.set("   ");
        draft.take();

        assert!(draft.history_previous());
        assert_eq!(draft.buffer(), "first question");
        assert!(draft.history_next());
        assert!(draft.is_empty());
        assert!(!draft.history_next());
    }

    #[test]
    fn walking_history_keeps_unsent_draft() {
        let mut draft = DraftComposer::new();
        draft.set("first question");
        draft.take();
        draft.set("second question");
        draft.take();

        for ch in "half-typed follow up".chars() {
            draft.insert_char(ch);
        }
        assert!(draft.history_previous());
        assert!(draft.history_previous());
        assert_eq!(draft.buffer(), "first question");
        assert!(draft.history_next());
        assert_eq!(draft.buffer(), "second question");
        assert!(draft.history_next());
        assert_eq!(draft.buffer(), "half-typed follow up");

        draft.insert_char('?');
        assert_eq!(draft.buffer(), "half-typed follow up?");
        assert!(!draft.history_next());
        assert_eq!(draft.buffer(), "half-typed follow up?");
    }

    #[test]
    fn line_navigation_moves_within_current_line() {
        let mut draft = DraftComposer::new();
        draft.set("one\ntwo");
        draft.move_to_line_start();
        draft.insert_char('>');
        assert_eq!(draft.buffer(), "one\n>two");
        draft.move_to_line_end();
        draft.insert_char('!');
        assert_eq!(draft.buffer(), "one\n>two!");
    }

    #[test]
    fn cursor_position_wraps_at_width() {
        let mut draft = DraftComposer::new();
        draft.set("abcdef\ngh");
        assert_eq!(draft.cursor_display_position(4), (2, 2));
    }
}
