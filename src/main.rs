use anyhow::Result;
use log::{debug, info};
use winit::{
    event::{Event, Touch, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{PointerTracker, TapRecognizer, TouchEvent};
use game::BounceScene;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Bounce Arena...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Bounce Arena")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
        .with_resizable(false)
        .build(&event_loop)?;

    let frame = window.inner_size().to_logical::<f32>(window.scale_factor());
    info!("Window created: {}x{} logical", frame.width, frame.height);

    let mut scene = BounceScene::new(frame.width, frame.height)?;
    let mut tracker = PointerTracker::new(frame.width, frame.height);
    let mut recognizer = TapRecognizer::new();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    info!(
                        "Session: {} frames, {} physics updates over {:.1}s",
                        game_loop.frame_count(),
                        game_loop.update_count(),
                        game_loop.elapsed_secs()
                    );
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::Resized(physical_size),
                    ..
                } => {
                    let logical = physical_size.to_logical::<f32>(window.scale_factor());
                    tracker.set_viewport(logical.width, logical.height);
                    info!("Window resized to {:?}", physical_size);
                }
                Event::WindowEvent {
                    event: WindowEvent::CursorMoved { position, .. },
                    ..
                } => {
                    let logical = position.to_logical::<f32>(window.scale_factor());
                    if let Some(touch) = tracker.on_cursor_moved(logical.x, logical.y) {
                        dispatch_touch(touch, &mut scene, &mut recognizer, &game_loop);
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseInput { state, button, .. },
                    ..
                } => {
                    if let Some(touch) = tracker.on_mouse_button(state, button) {
                        dispatch_touch(touch, &mut scene, &mut recognizer, &game_loop);
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::Touch(Touch {
                        id, phase, location, ..
                    }),
                    ..
                } => {
                    let logical = location.to_logical::<f32>(window.scale_factor());
                    if let Some(touch) = tracker.on_touch(id, phase, logical.x, logical.y) {
                        dispatch_touch(touch, &mut scene, &mut recognizer, &game_loop);
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    window.request_redraw();
                }
                Event::AboutToWait => {
                    elwt.set_control_flow(ControlFlow::Poll);

                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        scene.update(game_loop.fixed_timestep());
                    }

                    // Periodic heartbeat, roughly every ten seconds at 60 fps
                    if game_loop.frame_count() % 600 == 0 {
                        if let (Some(pos), Some(vel)) =
                            (scene.ball_position(), scene.ball_velocity())
                        {
                            debug!(
                                "fps {:.0}, ball at ({:.0}, {:.0}) moving ({:.0}, {:.0}), {} bounces, gravity {}",
                                game_loop.fps(),
                                pos.x,
                                pos.y,
                                vel.x,
                                vel.y,
                                scene.bounce_count(),
                                if scene.gravity_enabled() == Some(true) { "on" } else { "off" }
                            );
                        }
                    }

                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

/// Feed one touch event through gesture recognition and into the scene
fn dispatch_touch(
    event: TouchEvent,
    scene: &mut BounceScene,
    recognizer: &mut TapRecognizer,
    game_loop: &GameLoop,
) {
    let gesture = recognizer.observe(event, game_loop.elapsed());
    scene.handle_touch(event);
    if let Some(gesture) = gesture {
        scene.handle_gesture(gesture);
    }
}
