//! Checkbox Demo
//!
//! Mounts a checkbox in the runtime, clicks it, presses space on it, and
//! prints the notifications and markup it produces.
//!
//! Run with: cargo run -p ion_widgets --example checkbox_demo
//! Set RUST_LOG=debug to see emitted payloads.

use ion_core::events::{Event, KeyCode};
use ion_widgets::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> ion_widgets::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rt = Runtime::new();
    let id = rt.mount(|ctx| {
        checkbox()
            .value("pepperoni")
            .label_id("lbl-pepperoni")
            .on_change(|ev| println!("ionChange {}", serde_json::json!(ev)))
            .on_style(|ev| println!("ionStyle  {}", serde_json::json!(ev)))
            .build(ctx)
    });
    rt.run_until_idle();

    rt.dispatch(id, Event::click())?;
    rt.run_until_idle();
    println!("{}", rt.render(id)?.markup());

    rt.focus(id)?;
    rt.dispatch_key(Event::key_down(KeyCode::Space))?;
    rt.run_until_idle();
    println!("{}", rt.render(id)?.markup());

    rt.unmount(id)
}
