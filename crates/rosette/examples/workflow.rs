//! Lays out a small workflow and prints it as SVG.
//!
//! ```text
//! cargo run --example workflow > workflow.svg
//! ```

use rosette::{CanvasBuilder, RosetteError, identifier::Id, model::Side};

const WORKFLOW: &str = r##"
[[nodes]]
kind = "input_parameter"
id = "reads"
label = "Reads (FASTQ)"
connection_id = "#reads"
position = { x = 0.0, y = 120.0 }

[[nodes]]
kind = "input_parameter"
id = "reference"
label = "Reference genome"
connection_id = "#reference"
position = { x = 0.0, y = 280.0 }

[[nodes]]
kind = "step"
id = "align"
label = "Align"
connection_id = "#align"
position = { x = 220.0, y = 200.0 }

[[nodes.in]]
id = "reads"
connection_id = "#align/reads"

[[nodes.in]]
id = "reference"
connection_id = "#align/reference"

[[nodes.in]]
id = "threads"
connection_id = "#align/threads"
is_visible = false

[[nodes.out]]
id = "bam"
label = "BAM"
connection_id = "#align/bam"

[[nodes.out]]
id = "log"
connection_id = "#align/log"

[[nodes]]
kind = "output_parameter"
id = "alignment"
connection_id = "#alignment"
position = { x = 440.0, y = 200.0 }
"##;

fn main() -> Result<(), RosetteError> {
    let builder = CanvasBuilder::default();
    let canvas = builder.parse(WORKFLOW)?;

    let align = canvas.node(Id::new("align"))?;
    for side in Side::ALL {
        for (port, placement) in align.placed_ports(side) {
            eprintln!(
                "{side} {} {:.3}°",
                port.id(),
                placement.angle().degrees()
            );
        }
    }

    println!("{}", builder.render_svg(&canvas)?);
    Ok(())
}
