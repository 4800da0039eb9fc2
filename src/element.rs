#![warn(missing_docs)]
//! The optical elements that can be placed at the optical center.
use serde_derive::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Type of the optical element drawn at the optical center.
///
/// The canonical (kebab-case) names are `convex-lens`, `concave-lens`, `concave-mirror` and `convex-mirror`.
/// They are used for parsing ([`std::str::FromStr`]), for display and for (de-)serialization.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    /// converging lens
    #[default]
    ConvexLens,
    /// diverging lens
    ConcaveLens,
    /// converging mirror
    ConcaveMirror,
    /// diverging mirror
    ConvexMirror,
}

impl ElementType {
    /// Returns `true` if this element is drawn with the lens glyph.
    ///
    /// The decision is taken on the canonical name: every element whose name contains `lens` is a lens,
    /// everything else is a mirror.
    #[must_use]
    pub fn is_lens(&self) -> bool {
        self.as_ref().contains("lens")
    }
    /// Returns `true` if the element converges light (convex lens or concave mirror).
    #[must_use]
    pub const fn is_converging(&self) -> bool {
        matches!(self, Self::ConvexLens | Self::ConcaveMirror)
    }
    /// Short description of the element, suitable for an info panel next to the diagram.
    #[must_use]
    pub const fn info(&self) -> &'static str {
        match self {
            Self::ConvexLens => {
                "Convex lens: a converging lens, thicker at the center than at the edges. \
                 Parallel rays are focused into the focal point behind the lens. \
                 Objects outside the focal length form real, inverted images."
            }
            Self::ConcaveLens => {
                "Concave lens: a diverging lens, thinner at the center than at the edges. \
                 Parallel rays spread out as if they came from the focal point in front of the lens. \
                 It always forms virtual, upright and diminished images."
            }
            Self::ConcaveMirror => {
                "Concave mirror: a converging mirror curved inwards. \
                 Parallel rays are reflected through the focal point. \
                 Depending on the object position it forms real or virtual images."
            }
            Self::ConvexMirror => {
                "Convex mirror: a diverging mirror curved outwards. \
                 Reflected rays spread out as if they came from the focal point behind the mirror. \
                 It always forms virtual, upright and diminished images."
            }
        }
    }
}
