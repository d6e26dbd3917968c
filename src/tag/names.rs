//! Static tag name catalogue.
//!
//! Two tables map `(type, id - 1)` to a canonical name: the primary table for
//! ordinary tags and a small alternate table for tags carrying the `0x800`
//! extension nibble (string table and index introspection tags). The
//! `InvalidTag` entries inside the tables are holes in the catalogue.

use super::{Tag, TagType};

pub const NULL_NAME: &str = "NULL";
pub const INVALID_NAME: &str = "InvalidTag";

const NULL_TAGS: &[&str] = &[
    "INCLUDE",
    "GENERAL",
    "MATCH_LOGIC_NOT",
    "APPLY_ALL_SHIMS",
    "USE_SERVICE_PACK_FILES",
    "MITIGATION_OS",
    "BLOCK_UPGRADE",
    "INCLUDEEXCLUDEDLL",
    "RAC_EVENT_OFF",
    "TELEMETRY_OFF",
    "SHIM_ENGINE_OFF",
    "LAYER_PROPAGATION_OFF",
    "REINSTALL_UPGRADE",
];

const BYTE_TAGS: &[&str] = &[INVALID_NAME];

const WORD_TAGS: &[&str] = &["MATCH_MODE"];

const DWORD_TAGS: &[&str] = &[
    "SIZE",
    "OFFSET",
    "CHECKSUM",
    "SHIM_TAGID",
    "PATCH_TAGID",
    "MODULE_TYPE",
    "VERDATEHI",
    "VERDATELO",
    "VERFILEOS",
    "VERFILETYPE",
    "PE_CHECKSUM",
    "PREVOSMAJORVER",
    "PREVOSMINORVER",
    "PREVOSPLATFORMID",
    "PREVOSBUILDNO",
    "PROBLEMSEVERITY",
    "LANGID",
    "VER_LANGUAGE",
    INVALID_NAME,
    "ENGINE",
    "HTMLHELPID",
    "INDEX_FLAGS",
    "FLAGS",
    "DATA_VALUETYPE",
    "DATA_DWORD",
    "LAYER_TAGID",
    "MSI_TRANSFORM_TAGID",
    "LINKER_VERSION",
    "LINK_DATE",
    "UPTO_LINK_DATE",
    "OS_SERVICE_PACK",
    "FLAG_TAGID",
    "RUNTIME_PLATFORM",
    "OS_SKU",
    "OS_PLATFORM",
    "APP_NAME_RC_ID",
    "VENDOR_NAME_RC_ID",
    "SUMMARY_MSG_RC_ID",
    "VISTA_SKU",
    "DESCRIPTION_RC_ID",
    "PARAMETER1_RC_ID",
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    "CONTEXT_TAGID",
    "EXE_WRAPPER",
];

const QWORD_TAGS: &[&str] = &[
    "TIME",
    "BIN_FILE_VERSION",
    "BIN_PRODUCT_VERSION",
    "MODTIME",
    "FLAG_MASK_KERNEL",
    "UPTO_BIN_PRODUCT_VERSION",
    "DATA_QWORD",
    "FLAG_MASK_USER",
    "FLAGS_NTVDM1",
    "FLAGS_NTVDM2",
    "FLAGS_NTVDM3",
    "FLAG_MASK_SHELL",
    "UPTO_BIN_FILE_VERSION",
    "FLAG_MASK_FUSION",
    "FLAG_PROCESSPARAM",
    "FLAG_LUA",
    "FLAG_INSTALL",
];

const STRINGREF_TAGS: &[&str] = &[
    "NAME",
    "DESCRIPTION",
    "MODULE",
    "API",
    "VENDOR",
    "APP_NAME",
    INVALID_NAME,
    "COMMAND_LINE",
    "COMPANY_NAME",
    "DLLFILE",
    "WILDCARD_NAME",
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    "PRODUCT_NAME",
    "PRODUCT_VERSION",
    "FILE_DESCRIPTION",
    "FILE_VERSION",
    "ORIGINAL_FILENAME",
    "INTERNAL_NAME",
    "LEGAL_COPYRIGHT",
    "16BIT_DESCRIPTION",
    "APPHELP_DETAILS",
    "LINK_URL",
    "LINK_TEXT",
    "APPHELP_TITLE",
    "APPHELP_CONTACT",
    "SXS_MANIFEST",
    "DATA_STRING",
    "MSI_TRANSFORM_FILE",
    "16BIT_MODULE_NAME",
    "LAYER_DISPLAYNAME",
    "COMPILER_VERSION",
    "ACTION_TYPE",
    "EXPORT_NAME",
];

const LIST_TAGS: &[&str] = &[
    "DATABASE",
    "LIBRARY",
    "INEXCLUDE",
    "SHIM",
    "PATCH",
    "APP",
    "EXE",
    "MATCHING_FILE",
    "SHIM_REF",
    "PATCH_REF",
    "LAYER",
    "FILE",
    "APPHELP",
    "LINK",
    "DATA",
    "MSI_TRANSFORM",
    "MSI_TRANSFORM_REF",
    "MSI_PACKAGE",
    "FLAG",
    "MSI_CUSTOM_ACTION",
    "FLAG_REF",
    "ACTION",
    "LOOKUP",
    "CONTEXT",
    "CONTEXT_REF",
];

const STRING_TAGS: &[&str] = &[INVALID_NAME];

const BINARY_TAGS: &[&str] = &[
    INVALID_NAME,
    "PATCH_BITS",
    "FILE_BITS",
    "EXE_ID",
    "DATA_BITS",
    "MSI_PACKAGE_ID",
    "DATABASE_ID",
    "CONTEXT_PLATFORM_ID",
    "CONTEXT_BRANCH_ID",
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    INVALID_NAME,
    "FIX_ID",
    "APP_ID",
];

/// Primary table, indexed by type.
static PRIMARY: [&[&str]; 9] = [
    NULL_TAGS,
    BYTE_TAGS,
    WORD_TAGS,
    DWORD_TAGS,
    QWORD_TAGS,
    STRINGREF_TAGS,
    LIST_TAGS,
    STRING_TAGS,
    BINARY_TAGS,
];

/// Alternate table for `type | 0x800 | id`, indexed by type.
static ALTERNATE: [&[&str]; 9] = [
    &[],
    &[],
    &["TAG", "INDEX_TAG", "INDEX_KEY"],
    &["TAGID"],
    &[],
    &[],
    &["STRINGTABLE", "INDEXES", "INDEX"],
    &["STRINGTABLE_ITEM"],
    &["INDEX_BITS"],
];

/// Canonical name of `tag`, or `"InvalidTag"`.
///
/// Total over every 16-bit value.
pub fn tag_to_name(tag: Tag) -> &'static str {
    if tag == Tag::NULL {
        return NULL_NAME;
    }

    let tag_type = match TagType::from_tag(tag) {
        Some(tag_type) if tag.0 & !TagType::MASK != 0 => tag_type,
        _ => return INVALID_NAME,
    };

    let table = match tag.extension() {
        0 => PRIMARY[tag_type.index()],
        Tag::ALTERNATE_EXTENSION => ALTERNATE[tag_type.index()],
        _ => return INVALID_NAME,
    };

    (tag.id() as usize)
        .checked_sub(1)
        .and_then(|index| table.get(index))
        .copied()
        .unwrap_or(INVALID_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::catalog::*;

    #[test]
    fn test_known_names() {
        assert_eq!(tag_to_name(TAG_SIZE), "SIZE");
        assert_eq!(tag_to_name(TAG_FLAG_LUA), "FLAG_LUA");
        assert_eq!(tag_to_name(TAG_NAME), "NAME");
        assert_eq!(tag_to_name(TAG_DATABASE), "DATABASE");
        assert_eq!(tag_to_name(TAG_EXE), "EXE");
        assert_eq!(tag_to_name(TAG_MATCHING_FILE), "MATCHING_FILE");
        assert_eq!(tag_to_name(TAG_EXE_WRAPPER), "EXE_WRAPPER");
        assert_eq!(tag_to_name(TAG_EXPORT_NAME), "EXPORT_NAME");
        assert_eq!(tag_to_name(TAG_CONTEXT_REF), "CONTEXT_REF");
        assert_eq!(tag_to_name(TAG_APP_ID), "APP_ID");
        assert_eq!(tag_to_name(TAG_REINSTALL_UPGRADE), "REINSTALL_UPGRADE");
        assert_eq!(tag_to_name(TAG_MATCH_MODE), "MATCH_MODE");
    }

    #[test]
    fn test_alternate_names() {
        assert_eq!(tag_to_name(TAG_STRINGTABLE), "STRINGTABLE");
        assert_eq!(tag_to_name(TAG_STRINGTABLE_ITEM), "STRINGTABLE_ITEM");
        assert_eq!(tag_to_name(TAG_INDEXES), "INDEXES");
        assert_eq!(tag_to_name(TAG_INDEX), "INDEX");
        assert_eq!(tag_to_name(TAG_TAG), "TAG");
        assert_eq!(tag_to_name(TAG_INDEX_TAG), "INDEX_TAG");
        assert_eq!(tag_to_name(TAG_INDEX_KEY), "INDEX_KEY");
        assert_eq!(tag_to_name(TAG_TAGID), "TAGID");
        assert_eq!(tag_to_name(TAG_INDEX_BITS), "INDEX_BITS");
    }

    #[test]
    fn test_null_tag() {
        assert_eq!(tag_to_name(Tag::NULL), "NULL");
    }

    #[test]
    fn test_invalid_tags() {
        let invalid = [
            1,
            TagType::Word as u16,
            TagType::MASK,
            TagType::Dword as u16 | 0xFF,
            TagType::Dword as u16 | (0x800 + 0xEE),
            0x900,
            0xFFFF,
            0xDEAD,
            0xBEEF,
        ];
        for tag in invalid {
            assert_eq!(tag_to_name(Tag(tag)), INVALID_NAME, "tag 0x{:04X}", tag);
        }
    }

    #[test]
    fn test_catalogue_holes_are_invalid() {
        assert_eq!(tag_to_name(Tag(TagType::Byte as u16 | 1)), INVALID_NAME);
        assert_eq!(tag_to_name(Tag(TagType::Dword as u16 | 0x13)), INVALID_NAME);
        assert_eq!(tag_to_name(Tag(TagType::Binary as u16 | 1)), INVALID_NAME);
    }

    #[test]
    fn test_total_over_all_tags() {
        for raw in 0..=u16::MAX {
            let name = tag_to_name(Tag(raw));
            assert!(!name.is_empty());
            if raw & 0x0F00 != 0 && raw & 0x0F00 != 0x0800 {
                assert_eq!(name, INVALID_NAME);
            }
        }
    }
}
