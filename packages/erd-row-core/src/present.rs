//! Row presenter: turns field data and row state into a view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diff::{DiffTag, DiffVerdict};
use crate::edit::RowEditState;
use crate::field::{Field, FieldId, TableId};
use crate::host::ConnectionDrag;
use crate::ports::{PortPlanInput, PortPlanner, PortSet};

/// Props handed to a row by its table node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowProps {
    pub table_node_id: TableId,
    pub field: Field,
    /// The table node is selected
    pub focused: bool,
    /// The field takes part in a highlighted relationship
    pub highlighted: bool,
    pub visible: bool,
    pub is_connectable: bool,
}

impl RowProps {
    pub fn new(table_node_id: TableId, field: Field) -> Self {
        Self {
            table_node_id,
            field,
            focused: false,
            highlighted: false,
            visible: true,
            is_connectable: true,
        }
    }
}

/// Shared editor state a row reads each render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RowContext {
    pub read_only: bool,
    /// Relationships ending at this row's field
    pub inbound_count: usize,
    pub drag: ConnectionDrag,
    pub highlighted_custom_type: Option<String>,
    pub show_field_attributes: bool,
}

/// Background and border treatment of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowTone {
    #[default]
    Normal,
    RelationshipHighlighted,
    CustomTypeHighlighted,
    DiffChanged,
    DiffRemoved,
    DiffNew,
}

/// Type badge shown on the right of the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBadge {
    /// Old head word, struck through, when the field was retyped
    pub previous: Option<String>,
    /// Current head word
    pub head: String,
    /// `(len)` / `(p, s)` suffix when the preference is on
    pub attributes: Option<String>,
    pub nullable: bool,
}

impl TypeBadge {
    /// Returns the badge text without the struck-through part.
    pub fn text(&self) -> String {
        let mut text = self.head.clone();
        if let Some(attributes) = &self.attributes {
            text.push_str(attributes);
        }
        if self.nullable {
            text.push('?');
        }
        text
    }
}

/// Renders the badge with the old type struck through as `~~old~~ new`.
impl fmt::Display for TypeBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(previous) = &self.previous {
            write!(f, "~~{previous}~~ ")?;
        }
        f.write_str(&self.text())
    }
}

/// Rename input shown in place of the label while editing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameInput {
    pub value: String,
    /// Focus the input when it appears
    pub autofocus: bool,
}

/// Action buttons of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowActions {
    pub confirm_rename: bool,
    pub delete: bool,
}

/// Rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub field_id: FieldId,
    pub visible: bool,
    pub tone: RowTone,
    pub diff_icon: DiffTag,
    pub primary_key: bool,
    pub unique: bool,
    pub label: String,
    pub rename_input: Option<RenameInput>,
    pub type_badge: TypeBadge,
    /// Tooltip text from the field comment
    pub comment: Option<String>,
    /// `None` for non-connectable rows
    pub ports: Option<PortSet>,
    pub actions: RowActions,
}

/// Row-local state the presenter reads.
#[derive(Debug, Clone, Copy)]
pub struct RowState<'a> {
    pub edit: &'a RowEditState,
    pub hovered: bool,
    pub verdict: &'a DiffVerdict,
}

/// Produces the view of a row. Pure; equal inputs give equal views.
pub fn present(props: &RowProps, state: RowState<'_>, ctx: &RowContext) -> RowView {
    let field = &props.field;
    let editing = state.edit.editing();
    let diff = state.verdict.tag();

    let ports = PortPlanner::plan(&PortPlanInput {
        field: &field.id,
        table_node: &props.table_node_id,
        inbound_count: ctx.inbound_count,
        connectable: props.is_connectable,
        focused: props.focused,
        read_only: ctx.read_only,
        drag: &ctx.drag,
    });

    let comment = (!field.comments.trim().is_empty()).then(|| field.comments.clone());

    RowView {
        field_id: field.id.clone(),
        visible: props.visible,
        tone: tone(props, diff, ctx),
        diff_icon: diff,
        primary_key: field.primary_key,
        unique: field.unique,
        label: label(field, state.verdict),
        rename_input: editing.then(|| RenameInput {
            value: state.edit.pending_name().to_string(),
            autofocus: true,
        }),
        type_badge: type_badge(field, state.verdict, ctx.show_field_attributes),
        comment,
        ports,
        actions: RowActions {
            confirm_rename: editing && !ctx.read_only,
            delete: state.hovered && !editing && !ctx.read_only,
        },
    }
}

/// Diff tags beat highlights; a custom-type highlight beats a relationship one.
fn tone(props: &RowProps, diff: DiffTag, ctx: &RowContext) -> RowTone {
    match diff {
        DiffTag::Removed => return RowTone::DiffRemoved,
        DiffTag::New => return RowTone::DiffNew,
        DiffTag::Changed => return RowTone::DiffChanged,
        DiffTag::None => {}
    }
    let custom_type = ctx
        .highlighted_custom_type
        .as_deref()
        .is_some_and(|name| name == props.field.type_ref.name);
    if custom_type {
        RowTone::CustomTypeHighlighted
    } else if props.highlighted {
        RowTone::RelationshipHighlighted
    } else {
        RowTone::Normal
    }
}

fn label(field: &Field, verdict: &DiffVerdict) -> String {
    match &verdict.renamed_to {
        Some(new_name) => format!("{} \u{2192} {}", field.name, new_name),
        None => field.name.clone(),
    }
}

fn type_badge(field: &Field, verdict: &DiffVerdict, show_attributes: bool) -> TypeBadge {
    let current = field.type_ref.head_word().to_string();
    // Facets describe the current type only; they never decorate a retyped head
    let (previous, head, attributes) = match &verdict.retyped_to {
        Some(new_type) => (Some(current), new_type.head_word().to_string(), None),
        None => {
            let attributes = show_attributes.then(|| field.attribute_suffix()).flatten();
            (None, current, attributes)
        }
    };
    TypeBadge {
        previous,
        head,
        attributes,
        nullable: field.nullable,
    }
}
