use crate::foundation::core::Vec3;
use crate::scene::line::{Arg, CommandCall};
use serde::{Deserialize, Serialize};

/// Declarative initial placement for a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<BaseCreate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub offset: Vec3,
}

const CHESSBOARD_STYLE: &str = "5x5chessboard";
const CHESSBOARD_LIGHT: &str = "minecraft:snow";
const CHESSBOARD_DARK: &str = "minecraft:clay";

impl BaseLayout {
    pub fn chessboard(offset: Vec3) -> Self {
        Self {
            create: Some(BaseCreate {
                style: Some(CHESSBOARD_STYLE.to_owned()),
                offset,
            }),
        }
    }

    /// Expand the layout into placement calls for the host.
    ///
    /// Layouts without a `create.style`, or with a style this crate does not know, expand to
    /// nothing.
    pub fn expand(&self) -> Vec<CommandCall> {
        let Some(create) = &self.create else {
            return Vec::new();
        };
        let Some(style) = create.style.as_deref() else {
            return Vec::new();
        };

        match style {
            CHESSBOARD_STYLE => chessboard_5x5(create.offset),
            other => {
                tracing::warn!(style = other, "unknown base layout style; nothing placed");
                Vec::new()
            }
        }
    }
}

fn chessboard_5x5(offset: Vec3) -> Vec<CommandCall> {
    let mut out = Vec::with_capacity(25);
    for i in 0..5i32 {
        for j in 0..5i32 {
            let block = if (i + j) % 2 == 0 {
                CHESSBOARD_LIGHT
            } else {
                CHESSBOARD_DARK
            };
            let x = f64::from(i - 2) + offset.x;
            let z = f64::from(j - 2) + offset.z;
            out.push(CommandCall::new(
                "setblock",
                [
                    Arg::new(format!("'{block}'")),
                    Arg::new(x.to_string()),
                    Arg::new(offset.y.to_string()),
                    Arg::new(z.to_string()),
                ],
            ));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/base.rs"]
mod tests;
