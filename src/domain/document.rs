use serde::{Deserialize, Serialize};

/// A composed value type whose members all manage themselves.
///
/// # The Default Rule
/// `Document` owns heap data (two `String`s, a `Vec`), yet it defines no copy,
/// move, or drop logic of its own; the derives are the whole implementation.
/// That is the composition rule of this recipe: when every member already
/// obeys correct copy/move/destroy semantics, the composite is correct with
/// **zero** custom logic. `Clone` deep-copies member-wise, moves transfer the
/// whole value, and on drop the members release themselves, in declaration
/// order, after any enclosing drop body.
///
/// The rule cuts the other way too: one non-duplicable member poisons the
/// composite's copyability, at compile time:
///
/// ```compile_fail
/// use ownership_recipe::handles::ScratchHandle;
///
/// #[derive(Clone)] // ScratchHandle does not implement Clone
/// struct Draft {
///     title: String,
///     backing: ScratchHandle,
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
        }
    }

    pub fn tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }
}
