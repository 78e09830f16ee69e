//! Core application state and lifecycle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use framewright_core::{
    EditorWorkspace, InputState, PropertiesPanel, PropertySheet, TreeViewModel, WidgetId,
};
use framewright_render::{RenderContext, RenderResult, Renderer, RendererError, VelloBackend};
use kurbo::{Point, Rect, Size};
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::demo;
use crate::event_handler::{key_event, modifiers, mouse_button, scroll_delta};
use crate::ui::{render_ui, LayerRow, UiAction, UiModel, UiState};

/// Gap between the workspace and the window edges.
const WORKSPACE_MARGIN: f64 = 12.0;

/// Workspace rectangle for a window of `size` logical points, leaving room
/// for the side panels.
fn workspace_bounds(config: &AppConfig, size: Size) -> Rect {
    let left = config.panel_width;
    let right = (size.width - config.panel_width).max(left + 1.0);
    let bottom = (size.height - WORKSPACE_MARGIN).max(WORKSPACE_MARGIN + 1.0);
    Rect::new(left, WORKSPACE_MARGIN, right, bottom)
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    backend: VelloBackend,
    /// Texture blitter for RGBA->surface format conversion.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Editor
    workspace: EditorWorkspace,
    /// Optional collaborators; the editor runs without them.
    tree_view: Option<Rc<RefCell<TreeViewModel>>>,
    properties: Option<Rc<RefCell<PropertiesPanel>>>,
    /// Set by the workspace's preview observer.
    preview: Rc<Cell<Option<WidgetId>>>,
    input: InputState,
    started: Instant,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until its window closes.
    pub async fn run(config: AppConfig) -> Result<(), winit::error::EventLoopError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(config);
        event_loop.run_app(&mut app)
    }

    fn init_state(&mut self, window: Arc<Window>) -> RenderResult<AppState> {
        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        // Vello renders to Rgba8Unorm; the surface may use another format.
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let logical = size.to_logical::<f64>(window.scale_factor());
        let bounds = workspace_bounds(&self.config, Size::new(logical.width, logical.height));
        let mut workspace = EditorWorkspace::new(self.config.workspace.clone(), bounds);
        if let Err(e) = demo::populate(&mut workspace) {
            log::warn!("Failed to build demo composition: {e}");
        }

        let tree_view = Some(TreeViewModel::attach(&mut workspace));
        let properties = Some(PropertiesPanel::attach(&mut workspace));
        let preview = Rc::new(Cell::new(None));
        let sink = Rc::clone(&preview);
        workspace.on_preview(move |id| {
            log::info!("Previewing {id:?}");
            sink.set(Some(id));
        });

        log::info!("Framewright initialized - {width}x{height}");
        workspace.keymap().log_all();

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            backend: VelloBackend::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            workspace,
            tree_view,
            properties,
            preview,
            input: InputState::new(),
            started: Instant::now(),
        })
    }
}

impl AppState {
    fn logical_size(&self) -> Size {
        let scale = self.window.scale_factor();
        Size::new(
            self.surface.config.width as f64 / scale,
            self.surface.config.height as f64 / scale,
        )
    }

    fn apply_action(&mut self, action: UiAction) {
        let workspace = &mut self.workspace;
        let result = match action {
            UiAction::Create(kind) => {
                let parent = workspace.selected().filter(|&id| {
                    workspace
                        .tree()
                        .get(id)
                        .is_some_and(|w| w.kind.is_container())
                });
                let grid = workspace.config().grid_size;
                let position = Point::new(grid.width * 2.0, grid.height * 2.0);
                workspace.create_widget(kind, parent, position).map(|_| ())
            }
            UiAction::Select(id) => {
                workspace.set_selected(Some(id));
                Ok(())
            }
            UiAction::Hover(id) => {
                workspace.set_hovered(Some(id));
                Ok(())
            }
            UiAction::ToggleExpanded(id) => {
                if let Some(tree_view) = &self.tree_view {
                    tree_view.borrow_mut().toggle_expanded(id);
                }
                Ok(())
            }
            UiAction::SetVisible(id, visible) => workspace.set_visible(id, visible),
            UiAction::SetLocked(id, locked) => {
                workspace.set_locked(id, locked);
                Ok(())
            }
            UiAction::Edit(edit) => {
                // Observers borrow the panel mutably, so release it first.
                let target = self
                    .properties
                    .as_ref()
                    .and_then(|panel| panel.borrow().target());
                match target {
                    Some(id) => edit.apply(workspace, id),
                    None => Ok(()),
                }
            }
            UiAction::SetDrawGrid(draw) => {
                workspace.set_draw_grid(draw);
                Ok(())
            }
            UiAction::SetSnapToGrid(snap) => {
                workspace.set_snap_to_grid(snap);
                Ok(())
            }
            UiAction::SetGridSize(size) => {
                workspace.set_grid_size(Size::new(size, size));
                Ok(())
            }
            UiAction::Command(command) => {
                workspace.execute(command);
                Ok(())
            }
            UiAction::ClosePreview => {
                self.preview.set(None);
                Ok(())
            }
        };
        if let Err(e) = result {
            log::warn!("UI action failed: {e}");
        }
    }

    /// Run the egui panels and apply what they triggered.
    fn run_ui(&mut self, panel_width: f64) -> egui::FullOutput {
        let rows = match &self.tree_view {
            Some(tree_view) => {
                tree_view.borrow_mut().sync(&self.workspace);
                tree_view.borrow().rows()
            }
            None => Vec::new(),
        };
        let layers: Vec<LayerRow> = rows
            .into_iter()
            .map(|row| LayerRow {
                visible: self
                    .workspace
                    .tree()
                    .get(row.widget)
                    .is_some_and(|w| w.visible),
                locked: self.workspace.is_locked(row.widget),
                row,
            })
            .collect();
        let sheet = self
            .properties
            .as_ref()
            .and_then(|panel| panel.borrow().sheet(&self.workspace));
        let preview = self
            .preview
            .get()
            .and_then(|id| PropertySheet::read(&self.workspace, id));

        let model = UiModel {
            layers: &layers,
            sheet: sheet.as_ref(),
            bindings: self.workspace.keymap().bindings(),
            config: self.workspace.config(),
            panel_width: panel_width as f32,
            can_undo: self.workspace.can_undo(),
            can_redo: self.workspace.can_redo(),
            has_clipboard: self.workspace.has_clipboard(),
            preview: preview.as_ref(),
        };

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut actions = Vec::new();
        let ui_state = &mut self.ui_state;
        let output = self.egui_ctx.run(egui_input, |ctx| {
            actions = render_ui(ctx, ui_state, &model);
        });

        for action in actions {
            self.apply_action(action);
        }
        output
    }

    fn redraw(
        &mut self,
        render_cx: &vello::util::RenderContext,
        config: &AppConfig,
    ) -> RenderResult<()> {
        let egui_output = self.run_ui(config.panel_width);
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let scale = self.window.scale_factor();
        let ctx = RenderContext::new(&self.workspace, self.logical_size())
            .with_scale_factor(scale)
            .with_background(config.background_color())
            .with_time(self.started.elapsed().as_secs_f64());
        self.backend.set_scale(scale);
        self.backend.build_scene(&ctx);
        let base_color = self.backend.background_color(&ctx);
        let scene = self.backend.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(format!("{e:?}")))?;

        let width = self.surface.config.width;
        let height = self.surface.config.height;
        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{e:?}")))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        // Keep the workspace drawn by vello underneath.
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.init_state(window.clone()) {
            Ok(state) => {
                self.state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();
        let egui_wants_keyboard = state.egui_ctx.wants_keyboard_input();
        // A drag that started on the workspace keeps its events.
        let workspace_drag = state.input.is_button_pressed(framewright_core::MouseButton::Left)
            || state.input.is_button_pressed(framewright_core::MouseButton::Right);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                let bounds = workspace_bounds(&self.config, state.logical_size());
                state.workspace.set_bounds(bounds);
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                if let Err(e) = state.redraw(render_cx, &self.config) {
                    log::warn!("{e}");
                }
                // The reparent highlight pulses.
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                let event = state.input.pointer_moved(Point::new(logical.x, logical.y));
                if egui_wants_pointer && !workspace_drag {
                    return;
                }
                state.workspace.handle_pointer(event);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let Some(button) = mouse_button(button) else {
                    return;
                };
                let pressed = button_state == ElementState::Pressed;
                if egui_wants_pointer && (pressed || !state.input.is_button_pressed(button)) {
                    return;
                }
                let event = state.input.button(button, pressed);
                state.workspace.handle_pointer(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if egui_wants_pointer {
                    return;
                }
                let event = state.input.scroll(scroll_delta(delta));
                state.workspace.handle_pointer(event);
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                state.input.set_modifiers(modifiers(new_modifiers.state()));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_keyboard {
                    return;
                }
                if let Some(key) =
                    key_event(&event.logical_key, event.state, event.repeat, state.input.modifiers)
                {
                    state.workspace.handle_key(key);
                }
            }

            _ => {}
        }
    }
}
