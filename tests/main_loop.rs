// End-to-end tests for the main loop driver against the scripted backend

mod common;

use common::{AppCall, Recorder};
use viewer_shell::context::{DesktopGl, Negotiator};
use viewer_shell::events::{ButtonId, KeySym};
use viewer_shell::platform::scripted::{BackendCall, ScriptedBackend};
use viewer_shell::prelude::*;

fn established(backend: &mut ScriptedBackend) -> Negotiator {
    let mut negotiator = Negotiator::new(Box::new(DesktopGl));
    negotiator
        .establish(backend, &ShellConfig::default())
        .unwrap();
    negotiator
}

#[test]
fn test_quit_stops_before_render() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend.with_tick([
        RawEvent::KeyDown(KeySym::UP),
        RawEvent::MouseMotion { x: 10, y: 20 },
        RawEvent::Quit,
    ]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::default();

    let mut main_loop = MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard);
    assert_eq!(main_loop.tick().unwrap(), LoopState::Stopped);
    assert_eq!(main_loop.state(), LoopState::Stopped);
    // terminal state
    assert_eq!(main_loop.tick().unwrap(), LoopState::Stopped);

    assert_eq!(
        app.calls,
        vec![AppCall::KeyDown(Key::Up), AppCall::MouseMove(10, 20)]
    );
}

#[test]
fn test_empty_tick_renders_once() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend.with_tick(Vec::<RawEvent>::new());
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::default();

    let state = MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .tick()
        .unwrap();

    assert_eq!(state, LoopState::Running);
    assert_eq!(app.calls, vec![AppCall::Render]);
}

#[test]
fn test_events_after_quit_are_discarded() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend
        .with_tick([RawEvent::Quit, RawEvent::KeyDown(KeySym(u32::from(b'a')))])
        .with_tick([RawEvent::KeyDown(KeySym(u32::from(b'b')))]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::default();

    MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .run()
        .unwrap();

    assert!(app.calls.is_empty());
}

#[test]
fn test_resize_reconfigures_before_notifying() {
    let (backend, calls) = ScriptedBackend::new();
    let mut backend = backend.with_tick([RawEvent::Resize {
        width: 1024,
        height: 768,
    }]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::observing(&calls);

    MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .tick()
        .unwrap();

    assert_eq!(app.count(&AppCall::Resize(1024, 768)), 1);
    assert_eq!(app.calls, vec![AppCall::Resize(1024, 768), AppCall::Render]);

    let surface = app.surface_at_resize[0].unwrap();
    assert_eq!((surface.width, surface.height), (1024, 768));
    assert_eq!(surface.samples, 4);
    assert_eq!(calls.configures().len(), 2);
}

#[test]
fn test_failed_resize_is_fatal() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend
        .reject_surfaces(|req| req.width > 4000)
        .with_tick([RawEvent::Resize {
            width: 8192,
            height: 768,
        }]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::default();

    let err = MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::Context(_)));
    assert!(app.calls.is_empty());
}

#[test]
fn test_dispatch_is_fifo_and_drops_unmapped() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend.with_tick([
        RawEvent::KeyDown(KeySym::LSHIFT),
        RawEvent::KeyDown(KeySym(0x1A0)),
        RawEvent::MouseButton {
            button: ButtonId(7),
            pressed: true,
            x: 3,
            y: 4,
        },
        RawEvent::KeyUp(KeySym(0x1A0)),
        RawEvent::KeyUp(KeySym::RSHIFT),
        RawEvent::KeyDown(KeySym(u32::from(b'w'))),
    ]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::default();

    MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .run()
        .unwrap();

    assert_eq!(
        app.calls,
        vec![
            AppCall::KeyDown(Key::Shift),
            AppCall::MouseButton(Button::Left, true, 3, 4),
            AppCall::KeyUp(Key::Shift),
            AppCall::KeyDown(Key::Char('w')),
            AppCall::Render,
        ]
    );
}

#[test]
fn test_warp_from_callback_goes_through_guard() {
    let (backend, calls) = ScriptedBackend::new();
    let mut backend = backend.with_tick([
        RawEvent::MouseMotion { x: 10, y: 10 },
        RawEvent::MouseMotion { x: 12, y: 9 },
    ]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder {
        warp_on_move: Some((400, 300)),
        ..Recorder::default()
    };

    MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .tick()
        .unwrap();

    // the guard is released after each warp, so the second motion is genuine
    assert_eq!(
        app.inputs(),
        vec![AppCall::MouseMove(10, 10), AppCall::MouseMove(12, 9)]
    );
    assert_eq!(calls.count(&BackendCall::Warp(400, 300)), 2);
    assert!(!guard.is_active());
}

#[test]
fn test_motion_during_warp_is_dropped() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend
        .with_tick([RawEvent::MouseMotion { x: 1, y: 1 }])
        .with_tick([RawEvent::MouseMotion { x: 2, y: 2 }]);
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder::default();

    let mut main_loop = MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard);
    {
        let _warping = guard.engage();
        main_loop.tick().unwrap();
    }
    main_loop.tick().unwrap();
    main_loop.tick().unwrap();

    assert_eq!(app.inputs(), vec![AppCall::MouseMove(2, 2)]);
}

#[test]
fn test_render_failure_propagates() {
    let (backend, _calls) = ScriptedBackend::new();
    let mut backend = backend.with_tick(Vec::<RawEvent>::new());
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder {
        fail_render: true,
        ..Recorder::default()
    };

    let err = MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::Application(_)));
    assert!(err.to_string().contains("shader compilation failed"));
}

#[test]
fn test_flip_reaches_backend() {
    let (backend, calls) = ScriptedBackend::new();
    let mut backend = backend
        .with_tick(Vec::<RawEvent>::new())
        .with_tick(Vec::<RawEvent>::new());
    let mut negotiator = established(&mut backend);
    let guard = CursorGuard::new();
    let mut app = Recorder {
        flip: true,
        ..Recorder::default()
    };

    MainLoop::new(&mut app, &mut backend, &mut negotiator, &guard)
        .run()
        .unwrap();

    assert_eq!(app.count(&AppCall::Render), 2);
    assert_eq!(calls.count(&BackendCall::SwapBuffers), 2);
}
