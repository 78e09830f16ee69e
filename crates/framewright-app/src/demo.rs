//! Starting composition shown when the editor opens.

use framewright_core::{EditorWorkspace, TreeResult, Widget, WidgetKind};
use kurbo::{Point, Size};

/// Fill the workspace with a small login window and a side panel.
pub fn populate(workspace: &mut EditorWorkspace) -> TreeResult<()> {
    let root = workspace.workspace_id();

    let window = workspace.add_widget(
        root,
        Widget::new(WidgetKind::Window)
            .with_name("login")
            .with_caption("Sign in")
            .with_position(Point::new(40.0, 40.0))
            .with_size(Size::new(260.0, 200.0)),
    )?;
    workspace.add_widget(
        window,
        Widget::new(WidgetKind::Label)
            .with_caption("User name")
            .with_position(Point::new(20.0, 40.0)),
    )?;
    workspace.add_widget(
        window,
        Widget::new(WidgetKind::TextBox).with_position(Point::new(20.0, 60.0)),
    )?;
    workspace.add_widget(
        window,
        Widget::new(WidgetKind::CheckBox)
            .with_caption("Remember me")
            .with_position(Point::new(20.0, 100.0)),
    )?;
    workspace.add_widget(
        window,
        Widget::new(WidgetKind::Button)
            .with_caption("OK")
            .with_position(Point::new(140.0, 150.0)),
    )?;

    let panel = workspace.add_widget(
        root,
        Widget::new(WidgetKind::Panel)
            .with_name("sidebar")
            .with_position(Point::new(340.0, 40.0))
            .with_size(Size::new(180.0, 240.0)),
    )?;
    workspace.add_widget(
        panel,
        Widget::new(WidgetKind::Dropdown)
            .with_caption("Choose...")
            .with_position(Point::new(20.0, 20.0)),
    )?;
    workspace.add_widget(
        panel,
        Widget::new(WidgetKind::ListBox)
            .with_caption("Items")
            .with_position(Point::new(20.0, 60.0)),
    )?;

    // Building the demo is not something to undo.
    workspace.clear_history();
    log::debug!("Demo composition ready: {workspace:?}");
    Ok(())
}
