//! Test utilities shared across the codebase

use std::fs;
use std::path::{Path, PathBuf};
use crate::metadata::{BindingDescriptor, ExportDescriptor, MemberInfo, MemberKind, TypeInfo};

/// Build an mdoc type file with one member per `(name, return type)` pair
pub fn type_doc(full_name: &str, members: &[(&str, &str)]) -> String {
    let name = full_name.rsplit('.').next().unwrap_or(full_name);
    let mut out = format!("<Type Name=\"{}\" FullName=\"{}\">\n  <Members>\n", name, full_name);
    for (member, return_type) in members {
        out.push_str(&format!(
            "    <Member MemberName=\"{}\">\n      <ReturnValue>\n        <ReturnType>{}</ReturnType>\n      </ReturnValue>\n      <Docs>\n        <summary>To be added.</summary>\n        <remarks>To be added.</remarks>\n      </Docs>\n    </Member>\n",
            member, return_type
        ));
    }
    out.push_str("  </Members>\n</Type>\n");
    out
}

/// Write `content` to `<root>/en/<namespace>/<name>.xml`, returning the path
pub fn write_type_doc(root: &Path, namespace: &str, name: &str, content: &str) -> PathBuf {
    let dir = root.join("en").join(namespace);
    fs::create_dir_all(&dir).expect("Failed to create doc directory");
    let path = dir.join(format!("{}.xml", name));
    fs::write(&path, content).expect("Failed to write doc file");
    path
}

pub fn property(name: &str, return_type: &str) -> MemberInfo {
    MemberInfo {
        name: name.to_string(),
        kind: MemberKind::Property,
        return_type: Some(return_type.to_string()),
        export: None,
    }
}

pub fn exported(name: &str, return_type: &str, symbol: &str) -> MemberInfo {
    MemberInfo {
        export: Some(ExportDescriptor {
            symbol_name: symbol.to_string(),
        }),
        ..property(name, return_type)
    }
}

pub fn method(name: &str, return_type: Option<&str>) -> MemberInfo {
    MemberInfo {
        name: name.to_string(),
        kind: MemberKind::Method,
        return_type: return_type.map(str::to_string),
        export: None,
    }
}

pub fn type_info(namespace: &str, name: &str, members: Vec<MemberInfo>) -> TypeInfo {
    TypeInfo {
        namespace: namespace.to_string(),
        name: name.to_string(),
        members,
        binding: None,
    }
}

pub fn bound(mut t: TypeInfo, events: &[(&str, &str)]) -> TypeInfo {
    t.binding = Some(BindingDescriptor {
        events: events.iter().map(|(e, _)| e.to_string()).collect(),
        delegates: events.iter().map(|(_, d)| d.to_string()).collect(),
    });
    t
}
