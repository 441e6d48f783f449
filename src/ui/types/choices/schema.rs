use anyhow::{Context, Result, anyhow};
use schemars::{JsonSchema, Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldKind::String),
            "integer" => Some(FieldKind::Integer),
            "number" => Some(FieldKind::Number),
            "boolean" => Some(FieldKind::Boolean),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Number)
    }
}

/// Constraints a path field declares through `x-*` schema extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRules {
    pub must_exist: bool,
    pub must_be_file: bool,
    pub extensions: Vec<String>,
}

/// One prompt-able field of a choice's `params` object.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub nullable: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub path: Option<PathRules>,
}

pub fn schema_for<T: JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Field specs for the variant of a tagged enum whose `type` equals `kind_key`.
///
/// Fields with a non-primitive type (nested choices, skipped fields) are left
/// out; they are collected through [`UIChoice::subprompts`].
///
/// [`UIChoice::subprompts`]: crate::ui::types::choices::UIChoice::subprompts
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let branch = find_branch(root_obj, kind_key)?;

    let Some(params) = branch.get("params").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };
    let params = resolve_ref(root_obj, params)
        .ok_or_else(|| anyhow!("unresolvable params $ref for type={kind_key}"))?;

    let Some(props) = params.get("properties").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };
    let required: Vec<&str> = params
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut out = Vec::with_capacity(props.len());
    for (name, field) in props {
        let field = field.as_object().context("field schema is not an object")?;
        let field = resolve_ref(root_obj, field)
            .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        if let Some(spec) = field_spec(name, field, required.contains(&name.as_str())) {
            out.push(spec);
        }
    }
    Ok(out)
}

fn find_branch<'a>(root: &'a Map<String, Value>, kind_key: &str) -> Result<&'a Map<String, Value>> {
    let alternatives = root
        .get("oneOf")
        .or_else(|| root.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    alternatives
        .iter()
        .filter_map(|b| b.as_object()?.get("properties")?.as_object())
        .find(|props| tag_of(props) == Some(kind_key))
        .ok_or_else(|| anyhow!("no branch found for type={kind_key}"))
}

fn tag_of(props: &Map<String, Value>) -> Option<&str> {
    let tag = props.get("type")?.as_object()?;
    if let Some(c) = tag.get("const").and_then(Value::as_str) {
        return Some(c);
    }
    match tag.get("enum").and_then(Value::as_array)?.as_slice() {
        [only] => only.as_str(),
        _ => None,
    }
}

fn field_spec(name: &str, field: &Map<String, Value>, required: bool) -> Option<FieldSpec> {
    let (kind, nullable) = match field.get("type")? {
        Value::String(s) => (FieldKind::from_type_name(s)?, false),
        Value::Array(types) => {
            let names: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
            let kind = names.iter().find_map(|n| FieldKind::from_type_name(n))?;
            (kind, names.contains(&"null"))
        }
        _ => return None,
    };

    let number = |keys: [&str; 2]| keys.iter().find_map(|k| field.get(*k)?.as_f64());
    let flag = |key: &str| field.get(key).and_then(Value::as_bool).unwrap_or(false);

    let path = (field.get("format").and_then(Value::as_str) == Some("path")).then(|| PathRules {
        must_exist: flag("x-must-exist"),
        must_be_file: flag("x-file"),
        extensions: field
            .get("x-extensions")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default(),
    });

    Some(FieldSpec {
        name: name.to_string(),
        title: field
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string(),
        description: field
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        required,
        nullable,
        kind,
        default: field.get("default").cloned(),
        min: number(["minimum", "exclusiveMinimum"]),
        max: number(["maximum", "exclusiveMaximum"]),
        path,
    })
}

/// Follows a local `#/...` JSON pointer; objects without `$ref` pass through.
fn resolve_ref<'a>(
    root: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    let Some(reference) = obj.get("$ref") else {
        return Some(obj);
    };
    let pointer = reference.as_str()?.strip_prefix("#/")?;
    pointer.split('/').try_fold(root, |cur, raw| {
        let seg = raw.replace("~1", "/").replace("~0", "~");
        cur.get(&seg)?.as_object()
    })
}
