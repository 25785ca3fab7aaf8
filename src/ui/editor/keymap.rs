use reedline::{
    self, EditMode as ReedlineEditMode, KeyCode, KeyModifiers, Keybindings, Reedline,
    ReedlineEvent, default_emacs_keybindings, default_vi_insert_keybindings,
    default_vi_normal_keybindings,
};
use tracing::{debug, info};

use crate::runtime::config::EditMode;

pub const COMPLETION_MENU: &str = "completion_menu";
pub const INTERRUPT_SENTINEL: &str = "__CURL_SHELL_INTERRUPT__";

// Ctrl-C hands control back with the buffer intact so the editor can tell
// an empty-line interrupt from one that only discards typed input.
fn add_interrupt_binding(kb: &mut Keybindings) {
    kb.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('c'),
        ReedlineEvent::ExecuteHostCommand(INTERRUPT_SENTINEL.to_string()),
    );
}

fn add_shell_bindings(kb: &mut Keybindings) {
    kb.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    // Job control does not apply inside the shell.
    kb.add_binding(KeyModifiers::CONTROL, KeyCode::Char('z'), ReedlineEvent::None);
    add_interrupt_binding(kb);
}

pub fn edit_mode(mode: EditMode) -> Box<dyn ReedlineEditMode> {
    match mode {
        EditMode::Emacs => {
            let mut kb = default_emacs_keybindings();
            add_shell_bindings(&mut kb);
            Box::new(reedline::Emacs::new(kb))
        }
        EditMode::Vi => {
            let mut insert = default_vi_insert_keybindings();
            let mut normal = default_vi_normal_keybindings();
            add_shell_bindings(&mut insert);
            normal.add_binding(KeyModifiers::CONTROL, KeyCode::Char('z'), ReedlineEvent::None);
            add_interrupt_binding(&mut normal);
            Box::new(reedline::Vi::new(insert, normal))
        }
    }
}

pub fn make_reedline(mode: EditMode) -> Reedline {
    debug!(mode = %mode, "make_reedline start");
    let rl = Reedline::create().with_edit_mode(edit_mode(mode));
    info!(mode = %mode, "make_reedline ok");
    rl
}
