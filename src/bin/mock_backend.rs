//! Mock backend: answers every request on port 9001 with a fixed greeting

use hello_responders::{app, Responder};

fn main() -> anyhow::Result<()> {
    app::run(Responder::MockBackend)?;
    Ok(())
}
