//! Sidebar projection - one tab's list at a time, or nothing when the
//! sidebar is collapsed.

use crate::state::{AppState, SidebarTab};

use super::list::RenderedList;
use super::{character_list, chat_list, scenario_grid};

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarView {
    pub visible: bool,
    pub active_tab: SidebarTab,
    pub list: RenderedList,
}

pub fn render(state: &AppState) -> SidebarView {
    let active_tab = state.active_tab();
    let list = match active_tab {
        SidebarTab::Characters => character_list::render(state),
        SidebarTab::Chats => chat_list::render(state),
        SidebarTab::Scenarios => scenario_grid::render(state),
    };
    SidebarView {
        visible: state.sidebar_visible(),
        active_tab,
        list,
    }
}
