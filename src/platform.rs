// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `hello-frame`.
//
// `hello-frame` is free software: you can redistribute it and/or modify it under the terms of
// either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `hello-frame` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Lesser General Public License or the Mozilla Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `hello-frame`. If not, see <https://www.gnu.org/licenses/>.

//! Running the demo in a native window.
//!
//! Uses `winit` for the window and event loop and `glutin` for the OpenGL context. Both backends
//! end up in the same GL framebuffer: the GPU backend draws into it with `piet-glow`, the raster
//! backend draws into CPU memory and has the result blitted over.

use crate::backend::{BackendKind, Capabilities};
use crate::controller::{Controller, DemoOptions};
use crate::gl::Blitter;
use crate::raster::RasterSurface;
use crate::window::{DisplayParams, Flow, Layer, Modifiers, Window};
use crate::Error;

#[cfg(feature = "gpu")]
use crate::backend::GpuApi;
#[cfg(feature = "gpu")]
use crate::gpu::GlSurface as GpuSurface;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{GlSurface as _, Surface as GlutinSurface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};

use raw_window_handle::HasRawWindowHandle;

use winit::dpi::PhysicalSize;
use winit::event::{Event, ModifiersState, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window as WinitWindow, WindowBuilder};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::num::NonZeroU32;
use std::rc::Rc;

/// Open a window and run the demo until it asks to exit.
pub fn run(options: DemoOptions) -> Result<(), Box<dyn StdError>> {
    let event_loop = EventLoop::new();

    let shared = Rc::new(RefCell::new(Shared::default()));
    let (mut host, capabilities) = Host::new(&event_loop, &options.display, shared.clone())?;
    tracing::debug!(?capabilities, "window created");

    let window = PlatformWindow {
        shared,
        capabilities,
    };
    let mut controller = Some(Controller::new(window, capabilities, options));
    if let Some(layer) = controller.as_mut() {
        host.apply_requests(Some(layer));
    }

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        let flow = match controller.as_mut() {
            Some(layer) => host.handle(event, layer),
            None => Flow::Exit,
        };

        match flow {
            Flow::Continue => {
                if let Some(layer) = controller.as_mut() {
                    host.apply_requests(Some(layer));
                }
            }
            Flow::Exit => {
                // Dropping the controller detaches its backend.
                drop(controller.take());
                host.apply_requests(None);
                control_flow.set_exit();
            }
        }
    })
}

/// Something the controller asked the window to do.
#[derive(Debug)]
enum Request {
    DisplayParams(DisplayParams),
    Attach(BackendKind),
    Detach,
    Show,
    Invalidate,
    SetTitle(String),
}

/// State shared between the [`PlatformWindow`] and the event loop.
#[derive(Debug, Default)]
struct Shared {
    /// Requests that haven't been carried out yet.
    requests: VecDeque<Request>,

    /// The backend that is attached, or about to be.
    attached: Option<BackendKind>,
}

/// The controller's handle to the native window.
///
/// Requests are queued and carried out by the event loop once the current callback returns.
#[derive(Debug)]
pub struct PlatformWindow {
    shared: Rc<RefCell<Shared>>,
    capabilities: Capabilities,
}

impl PlatformWindow {
    fn push(&self, request: Request) {
        self.shared.borrow_mut().requests.push_back(request);
    }
}

impl Window for PlatformWindow {
    fn set_display_params(&mut self, params: DisplayParams) {
        self.push(Request::DisplayParams(params));
    }

    fn attach(&mut self, backend: BackendKind) -> Result<(), Error> {
        if !self.capabilities.supports(backend) {
            return Err(Error::NoGpuBackend);
        }

        let mut shared = self.shared.borrow_mut();
        if shared.attached.is_some() {
            return Err(Error::AlreadyAttached);
        }

        shared.attached = Some(backend);
        shared.requests.push_back(Request::Attach(backend));
        Ok(())
    }

    fn detach(&mut self) {
        let mut shared = self.shared.borrow_mut();
        if shared.attached.take().is_some() {
            shared.requests.push_back(Request::Detach);
        }
    }

    fn attached(&self) -> Option<BackendKind> {
        self.shared.borrow().attached
    }

    fn show(&mut self) {
        self.push(Request::Show);
    }

    fn invalidate(&mut self) {
        self.push(Request::Invalidate);
    }

    fn set_title(&mut self, title: &str) {
        self.push(Request::SetTitle(title.to_owned()));
    }
}

/// The thing that is drawing into the window.
enum Renderer {
    /// Draw on the CPU, then blit.
    Raster {
        surface: RasterSurface,
        blitter: Blitter<glow::Context>,
    },

    /// Draw with the GPU.
    #[cfg(feature = "gpu")]
    Gpu(Box<piet_glow::GlContext<glow::Context>>),
}

/// The OpenGL state of the window.
struct GlState {
    /// The context, which is always current.
    context: PossiblyCurrentContext,

    /// The window's framebuffer.
    surface: GlutinSurface<WindowSurface>,

    /// The display the context was created on.
    #[cfg(feature = "gpu")]
    display: Display,

    /// Function pointers for the raster presenter.
    glow: glow::Context,
}

/// Everything the event loop owns.
struct Host {
    /// The attached renderer.
    renderer: Option<Renderer>,

    /// The GL context and framebuffer.
    gl: GlState,

    /// The native window.
    window: WinitWindow,

    /// Requests from the controller.
    shared: Rc<RefCell<Shared>>,

    /// The modifiers currently held.
    modifiers: Modifiers,
}

impl Host {
    fn new<T>(
        event_loop: &EventLoopWindowTarget<T>,
        params: &DisplayParams,
        shared: Rc<RefCell<Shared>>,
    ) -> Result<(Self, Capabilities), Box<dyn StdError>> {
        let window_builder = WindowBuilder::new()
            .with_title("Hello World")
            .with_visible(false)
            .with_inner_size(PhysicalSize::new(params.width, params.height));

        let mut template = ConfigTemplateBuilder::new().with_alpha_size(8);
        if params.msaa_samples > 0 {
            template = template.with_multisampling(params.msaa_samples);
        }

        // Pick the config with the most samples.
        let (window, config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("the display offered no GL configs")
            })?;
        let window = window.ok_or("the window was not created")?;

        // Try to build a several different contexts.
        let window_handle = Some(window.raw_window_handle());
        let contexts = [
            ContextAttributesBuilder::new().build(window_handle),
            ContextAttributesBuilder::new()
                .with_context_api(ContextApi::Gles(None))
                .build(window_handle),
            ContextAttributesBuilder::new()
                .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
                .build(window_handle),
        ];

        let display = config.display();
        let not_current = contexts
            .iter()
            .find_map(|attrs| unsafe { display.create_context(&config, attrs) }.ok())
            .ok_or("could not create a GL context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let surface = unsafe { display.create_window_surface(&config, &attrs)? };
        let context = not_current.make_current(&surface)?;

        if let Err(err) = surface.set_swap_interval(&context, swap_interval(params.vsync)) {
            tracing::warn!("error setting vsync: {:?}", err);
        }

        // SAFETY: the context is current.
        let glow = unsafe { load_glow(&display) };
        let capabilities = probe(&display, Capabilities::detect());

        let host = Host {
            renderer: None,
            gl: GlState {
                context,
                surface,
                #[cfg(feature = "gpu")]
                display,
                glow,
            },
            window,
            shared,
            modifiers: Modifiers::default(),
        };

        Ok((host, capabilities))
    }

    /// Dispatch one event to the layer.
    fn handle(&mut self, event: Event<'_, ()>, layer: &mut dyn Layer) -> Flow {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => self.resize(size),
                WindowEvent::CloseRequested => return Flow::Exit,
                WindowEvent::ModifiersChanged(state) => self.modifiers = modifiers(state),
                WindowEvent::ReceivedCharacter(character) => {
                    layer.on_char(character, self.modifiers);
                }
                _ => {}
            },
            Event::MainEventsCleared => layer.on_idle(),
            Event::RedrawRequested(_) => return self.paint(layer),
            _ => {}
        }

        Flow::Continue
    }

    /// Carry out everything the controller asked for.
    fn apply_requests(&mut self, mut layer: Option<&mut dyn Layer>) {
        loop {
            let request = match self.shared.borrow_mut().requests.pop_front() {
                Some(request) => request,
                None => break,
            };

            match request {
                Request::DisplayParams(params) => self.set_display_params(&params),
                Request::Attach(backend) => match self.attach(backend) {
                    Ok(()) => {
                        tracing::debug!(%backend, "backend attached");
                        if let Some(layer) = layer.as_deref_mut() {
                            layer.on_backend_created();
                        }
                    }
                    Err(err) => {
                        tracing::error!(%backend, "failed to attach backend: {}", err);
                        self.shared.borrow_mut().attached = None;
                    }
                },
                Request::Detach => self.detach(),
                Request::Show => self.window.set_visible(true),
                Request::Invalidate => self.window.request_redraw(),
                Request::SetTitle(title) => self.window.set_title(&title),
            }
        }
    }

    fn set_display_params(&mut self, params: &DisplayParams) {
        self.window
            .set_inner_size(PhysicalSize::new(params.width, params.height));

        if let Err(err) = self
            .gl
            .surface
            .set_swap_interval(&self.gl.context, swap_interval(params.vsync))
        {
            tracing::warn!("error setting vsync: {:?}", err);
        }
    }

    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width.max(1), size.height.max(1))
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let width = NonZeroU32::new(size.width);
        let height = NonZeroU32::new(size.height);
        if let (Some(width), Some(height)) = (width, height) {
            self.gl.surface.resize(&self.gl.context, width, height);
        }
    }

    fn attach(&mut self, backend: BackendKind) -> Result<(), Error> {
        if self.renderer.is_some() {
            return Err(Error::AlreadyAttached);
        }

        let renderer = match backend {
            BackendKind::Raster => {
                let (width, height) = self.size();
                Renderer::Raster {
                    surface: RasterSurface::new(width, height)?,
                    // SAFETY: the context is current.
                    blitter: unsafe { Blitter::new(&self.gl.glow)? },
                }
            }

            #[cfg(feature = "gpu")]
            BackendKind::Gpu(GpuApi::Gl) => {
                // SAFETY: the context is current.
                let renderer = unsafe { piet_glow::GlContext::new(load_glow(&self.gl.display))? };
                Renderer::Gpu(Box::new(renderer))
            }

            BackendKind::Gpu(_) => return Err(Error::NoGpuBackend),
        };

        self.renderer = Some(renderer);
        Ok(())
    }

    fn detach(&mut self) {
        match self.renderer.take() {
            Some(Renderer::Raster { blitter, .. }) => {
                // SAFETY: the context is current.
                unsafe { blitter.destroy(&self.gl.glow) }
            }

            #[cfg(feature = "gpu")]
            Some(Renderer::Gpu(renderer)) => drop(renderer),

            None => {}
        }
    }

    fn paint(&mut self, layer: &mut dyn Layer) -> Flow {
        let (width, height) = self.size();

        let flow = match &mut self.renderer {
            None => return Flow::Continue,

            Some(Renderer::Raster { surface, blitter }) => {
                if let Err(err) = surface.resize(width, height) {
                    tracing::error!("cannot paint: {}", err);
                    return Flow::Continue;
                }

                let flow = layer.on_paint(surface);

                // SAFETY: the context is current.
                if let Err(err) = unsafe { blitter.present(&self.gl.glow, surface.pixmap()) } {
                    tracing::error!("failed to present frame: {}", err);
                }

                flow
            }

            #[cfg(feature = "gpu")]
            Some(Renderer::Gpu(renderer)) => {
                // SAFETY: the context is current.
                let mut surface = unsafe { GpuSurface::new(renderer, width, height) };
                layer.on_paint(&mut surface)
            }
        };

        if let Err(err) = self.gl.surface.swap_buffers(&self.gl.context) {
            tracing::error!("failed to swap buffers: {}", err);
        }

        flow
    }
}

/// Load GL function pointers from the display.
///
/// # Safety
///
/// A context created on `display` must be current.
unsafe fn load_glow(display: &Display) -> glow::Context {
    glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s) as *const _)
}

/// Narrow the compiled-in capabilities to what this GL context can run.
#[cfg(feature = "gpu")]
fn probe(display: &Display, capabilities: Capabilities) -> Capabilities {
    if capabilities.gpu.is_none() {
        return capabilities;
    }

    // SAFETY: the context is current.
    match unsafe { piet_glow::GlContext::new(load_glow(display)) } {
        Ok(_) => capabilities,
        Err(err) => {
            tracing::warn!("GPU backend unavailable, falling back to raster: {}", err);
            Capabilities::raster_only()
        }
    }
}

#[cfg(not(feature = "gpu"))]
fn probe(_display: &Display, capabilities: Capabilities) -> Capabilities {
    capabilities
}

fn swap_interval(vsync: bool) -> SwapInterval {
    match NonZeroU32::new(1) {
        Some(interval) if vsync => SwapInterval::Wait(interval),
        _ => SwapInterval::DontWait,
    }
}

fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift(),
        control: state.ctrl(),
        alt: state.alt(),
        logo: state.logo(),
    }
}
