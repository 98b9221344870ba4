use crate::catalog::CommandCatalog;
use crate::compile::program::{CommandOp, CompiledFragment, CompiledScene, Instruction};
use crate::estimate::{DurationTable, estimate_fragment};
use crate::foundation::error::{PonderError, PonderResult};
use crate::scene::line::parse_line;
use crate::scene::model::{Fragment, ScriptDocument};

/// Compile one fragment's command lines into an instruction list.
///
/// Never fails: blank lines and comments are dropped, and lines that do not parse or name no
/// catalog command become [`Instruction::Unclassified`].
pub fn compile_fragment(
    index: usize,
    fragment: &Fragment,
    catalog: &CommandCatalog,
) -> CompiledFragment {
    let mut instructions = Vec::with_capacity(fragment.lines.len());

    for (line, text) in fragment.lines.iter().enumerate() {
        let call = match parse_line(text) {
            Ok(Some(call)) => call,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(fragment = index, line, error = %e, "line is not a single call");
                instructions.push(Instruction::Unclassified {
                    line,
                    text: text.trim().to_owned(),
                });
                continue;
            }
        };

        let Some(spec) = catalog.classify(&call) else {
            tracing::debug!(fragment = index, line, name = %call.name, "unknown command");
            instructions.push(Instruction::Unclassified {
                line,
                text: text.trim().to_owned(),
            });
            continue;
        };

        instructions.push(Instruction::Command(CommandOp {
            line,
            suspends: spec.is_suspending(&call.args),
            duration_secs: spec.duration_of(&call.args),
            call,
        }));
    }

    let mut out = CompiledFragment {
        index,
        instructions,
        estimated_secs: 0.0,
    };
    out.estimated_secs = estimate_fragment(&out);
    out
}

/// Compile every fragment of a scene and build its duration table.
#[tracing::instrument(skip(doc, catalog))]
pub fn compile_scene(
    doc: &ScriptDocument,
    scene_index: usize,
    catalog: &CommandCatalog,
) -> PonderResult<CompiledScene> {
    let scene = doc.scene(scene_index).ok_or(PonderError::SceneOutOfRange {
        index: scene_index,
        count: doc.scene_count(),
    })?;

    let fragments: Vec<CompiledFragment> = scene
        .fragments
        .iter()
        .enumerate()
        .map(|(i, f)| compile_fragment(i, f, catalog))
        .collect();
    let durations = DurationTable::for_scene(scene_index, &fragments);

    tracing::debug!(
        fragments = fragments.len(),
        total_secs = durations.total_secs(),
        "scene compiled"
    );

    Ok(CompiledScene {
        scene_index,
        fragments,
        durations,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
