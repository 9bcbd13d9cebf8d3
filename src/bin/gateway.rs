//! Gateway: answers every request on port 8080 with a fixed greeting

use hello_responders::{app, Responder};

fn main() -> anyhow::Result<()> {
    app::run(Responder::Gateway)?;
    Ok(())
}
