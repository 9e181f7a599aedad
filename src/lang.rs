//! Player-facing strings.
//!
//! `Zh` is the plugin's first language; `En` mirrors it.
//! Messages that embed values take them already formatted and add their own
//! color codes around them.

use serde::Deserialize;

use crate::format::code::{BOLD, CLEAR, GOLD, GREEN, RED};
use crate::model::Dimension;

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

/// Fixed strings with no embedded values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    ManageTitle,
    ManageAdd,
    ManageDelete,
    ManageStopNavigation,
    AddTitle,
    AddName,
    AddX,
    AddY,
    AddZ,
    AddDimension,
    AddDescription,
    DeleteTitle,
    DeleteContent,
    ConfirmTitle,
    ConfirmYes,
    ConfirmNo,
    DetailTitle,
    DetailName,
    DetailCreator,
    DetailPosition,
    DetailDate,
    DetailDescription,
    DetailNoDescription,
    DetailNavigate,
    DetailDelete,
    DetailBack,
    InvalidInput,
    Cancelled,
    NotFound,
    StorageFailed,
    NotAPlayer,
    ManageCommandDescription,
    ListCommandDescription,
}

impl Locale {
    pub fn text(self, text: Text) -> &'static str {
        match self {
            Self::En => en(text),
            Self::Zh => zh(text),
        }
    }

    /// Label for a dimension. Unrecognized ids get the "unknown" label.
    pub fn dimension(self, dim: Dimension) -> &'static str {
        match (self, dim) {
            (Self::En, Dimension::Overworld) => "Overworld",
            (Self::En, Dimension::Nether) => "Nether",
            (Self::En, Dimension::End) => "The End",
            (Self::En, Dimension::Unknown(_)) => "unknown",
            (Self::Zh, Dimension::Overworld) => "主世界",
            (Self::Zh, Dimension::Nether) => "地狱",
            (Self::Zh, Dimension::End) => "末地",
            (Self::Zh, Dimension::Unknown(_)) => "未知",
        }
    }

    pub fn default_warp_name(self, player: &str) -> String {
        match self {
            Self::En => format!("{player}'s warp"),
            Self::Zh => format!("{player} 创建的Warp"),
        }
    }

    pub fn warp_count(self, count: usize) -> String {
        match self {
            Self::En => format!("There are {GREEN}{count}{CLEAR} warps"),
            Self::Zh => format!("目前已有 {GREEN}{count}{CLEAR} 个Warp"),
        }
    }

    pub fn created(self, name: &str, pos: &str) -> String {
        match self {
            Self::En => format!("{GREEN}Created warp {GOLD}{name}{GREEN}!\nPosition: {pos}"),
            Self::Zh => format!("{GREEN}创建Warp {GOLD}{name} {GREEN}成功！\n坐标：{pos}"),
        }
    }

    pub fn confirm_delete(self, name: &str, pos: &str) -> String {
        match self {
            Self::En => format!("Really delete warp {BOLD}{GOLD}{name}{CLEAR} ({pos}{CLEAR})?"),
            Self::Zh => format!("真的要删除Warp {BOLD}{GOLD}{name}{CLEAR}({pos}{CLEAR}) 吗？"),
        }
    }

    pub fn deleted(self, name: &str, pos: &str) -> String {
        match self {
            Self::En => format!("{GREEN}Deleted warp {GOLD}{name}\n{GREEN}Position: {pos}"),
            Self::Zh => format!("{GREEN}已删除Warp {GOLD}{name}\n{GREEN}坐标： {pos}"),
        }
    }

    /// Prefixes an error line with the error color.
    pub fn error(self, text: Text) -> String {
        format!("{RED}{}", self.text(text))
    }
}

fn en(text: Text) -> &'static str {
    match text {
        Text::ManageTitle | Text::ManageCommandDescription => "Manage warps",
        Text::ManageAdd | Text::AddTitle => "Add warp",
        Text::ManageDelete | Text::DeleteTitle => "Delete warp",
        Text::ManageStopNavigation => "Stop navigation",
        Text::AddName => "Warp name",
        Text::AddX => "X",
        Text::AddY => "Y",
        Text::AddZ => "Z",
        Text::AddDimension => "Dimension",
        Text::AddDescription => "Description",
        Text::DeleteContent => "Choose the warp to delete",
        Text::ConfirmTitle => "Confirm",
        Text::ConfirmYes => "Yes, do it",
        Text::ConfirmNo => "No, go back",
        Text::DetailTitle => "Warp details",
        Text::DetailName => "Name",
        Text::DetailCreator => "Creator",
        Text::DetailPosition => "Position",
        Text::DetailDate => "Created",
        Text::DetailDescription => "Description",
        Text::DetailNoDescription => "none",
        Text::DetailNavigate => "Navigate",
        Text::DetailDelete => "Delete",
        Text::DetailBack => "Back to warp list",
        Text::InvalidInput => "Please enter valid values",
        Text::Cancelled => "Cancelled",
        Text::NotFound => "That warp no longer exists!",
        Text::StorageFailed => "Could not access warp data",
        Text::NotAPlayer => "This command can only be run by a player",
        Text::ListCommandDescription => "List warps",
    }
}

fn zh(text: Text) -> &'static str {
    match text {
        Text::ManageTitle => "Warp管理",
        Text::ManageAdd | Text::AddTitle => "添加Warp",
        Text::ManageDelete | Text::DeleteTitle => "删除Warp",
        Text::ManageStopNavigation => "取消导航",
        Text::AddName => "Warp名称",
        Text::AddX => "X坐标",
        Text::AddY => "Y坐标",
        Text::AddZ => "Z坐标",
        Text::AddDimension => "维度",
        Text::AddDescription => "Warp简介",
        Text::DeleteContent => "请选择你要删除的Warp",
        Text::ConfirmTitle => "确认",
        Text::ConfirmYes => "我想好了",
        Text::ConfirmNo => "我手滑了",
        Text::DetailTitle => "Warp详情",
        Text::DetailName => "名称",
        Text::DetailCreator => "创建者",
        Text::DetailPosition => "坐标",
        Text::DetailDate => "创建日期",
        Text::DetailDescription => "简介",
        Text::DetailNoDescription => "无",
        Text::DetailNavigate => "导航",
        Text::DetailDelete => "删除",
        Text::DetailBack => "返回Warp列表",
        Text::InvalidInput => "请输入合法内容",
        Text::Cancelled => "操作取消",
        Text::NotFound => "Warp不存在！",
        Text::StorageFailed => "读写Warp数据失败",
        Text::NotAPlayer => "该命令只能由玩家执行",
        Text::ManageCommandDescription => "管理Warp",
        Text::ListCommandDescription => "查看Warp",
    }
}
