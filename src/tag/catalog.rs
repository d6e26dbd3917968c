//! Well-known tags of the shim database format.

use super::{Tag, TagType};

const fn null(id: u16) -> Tag {
    Tag::new(TagType::Null, id)
}

const fn word(id: u16) -> Tag {
    Tag::new(TagType::Word, id)
}

const fn dword(id: u16) -> Tag {
    Tag::new(TagType::Dword, id)
}

const fn qword(id: u16) -> Tag {
    Tag::new(TagType::Qword, id)
}

const fn stringref(id: u16) -> Tag {
    Tag::new(TagType::StringRef, id)
}

const fn list(id: u16) -> Tag {
    Tag::new(TagType::List, id)
}

const fn string(id: u16) -> Tag {
    Tag::new(TagType::String, id)
}

const fn binary(id: u16) -> Tag {
    Tag::new(TagType::Binary, id)
}

// NULL
pub const TAG_INCLUDE: Tag = null(0x1);
pub const TAG_GENERAL: Tag = null(0x2);
pub const TAG_MATCH_LOGIC_NOT: Tag = null(0x3);
pub const TAG_APPLY_ALL_SHIMS: Tag = null(0x4);
pub const TAG_USE_SERVICE_PACK_FILES: Tag = null(0x5);
pub const TAG_MITIGATION_OS: Tag = null(0x6);
pub const TAG_BLOCK_UPGRADE: Tag = null(0x7);
pub const TAG_INCLUDEEXCLUDEDLL: Tag = null(0x8);
pub const TAG_RAC_EVENT_OFF: Tag = null(0x9);
pub const TAG_TELEMETRY_OFF: Tag = null(0xA);
pub const TAG_SHIM_ENGINE_OFF: Tag = null(0xB);
pub const TAG_LAYER_PROPAGATION_OFF: Tag = null(0xC);
pub const TAG_REINSTALL_UPGRADE: Tag = null(0xD);

// WORD
pub const TAG_MATCH_MODE: Tag = word(0x1);
pub const TAG_TAG: Tag = word(0x801);
pub const TAG_INDEX_TAG: Tag = word(0x802);
pub const TAG_INDEX_KEY: Tag = word(0x803);

// DWORD
pub const TAG_SIZE: Tag = dword(0x1);
pub const TAG_OFFSET: Tag = dword(0x2);
pub const TAG_CHECKSUM: Tag = dword(0x3);
pub const TAG_SHIM_TAGID: Tag = dword(0x4);
pub const TAG_PATCH_TAGID: Tag = dword(0x5);
pub const TAG_MODULE_TYPE: Tag = dword(0x6);
pub const TAG_VERDATEHI: Tag = dword(0x7);
pub const TAG_VERDATELO: Tag = dword(0x8);
pub const TAG_VERFILEOS: Tag = dword(0x9);
pub const TAG_VERFILETYPE: Tag = dword(0xA);
pub const TAG_PE_CHECKSUM: Tag = dword(0xB);
pub const TAG_LANGID: Tag = dword(0x11);
pub const TAG_VER_LANGUAGE: Tag = dword(0x12);
pub const TAG_ENGINE: Tag = dword(0x14);
pub const TAG_HTMLHELPID: Tag = dword(0x15);
pub const TAG_INDEX_FLAGS: Tag = dword(0x16);
pub const TAG_FLAGS: Tag = dword(0x17);
pub const TAG_DATA_VALUETYPE: Tag = dword(0x18);
pub const TAG_DATA_DWORD: Tag = dword(0x19);
pub const TAG_LAYER_TAGID: Tag = dword(0x1A);
pub const TAG_MSI_TRANSFORM_TAGID: Tag = dword(0x1B);
pub const TAG_LINKER_VERSION: Tag = dword(0x1C);
pub const TAG_LINK_DATE: Tag = dword(0x1D);
pub const TAG_UPTO_LINK_DATE: Tag = dword(0x1E);
pub const TAG_OS_SERVICE_PACK: Tag = dword(0x1F);
pub const TAG_FLAG_TAGID: Tag = dword(0x20);
pub const TAG_RUNTIME_PLATFORM: Tag = dword(0x21);
pub const TAG_OS_SKU: Tag = dword(0x22);
pub const TAG_OS_PLATFORM: Tag = dword(0x23);
pub const TAG_CONTEXT_TAGID: Tag = dword(0x30);
pub const TAG_EXE_WRAPPER: Tag = dword(0x31);
pub const TAG_TAGID: Tag = dword(0x801);

// QWORD
pub const TAG_TIME: Tag = qword(0x1);
pub const TAG_BIN_FILE_VERSION: Tag = qword(0x2);
pub const TAG_BIN_PRODUCT_VERSION: Tag = qword(0x3);
pub const TAG_MODTIME: Tag = qword(0x4);
pub const TAG_FLAG_MASK_KERNEL: Tag = qword(0x5);
pub const TAG_UPTO_BIN_PRODUCT_VERSION: Tag = qword(0x6);
pub const TAG_DATA_QWORD: Tag = qword(0x7);
pub const TAG_FLAG_MASK_USER: Tag = qword(0x8);
pub const TAG_FLAG_MASK_SHELL: Tag = qword(0xC);
pub const TAG_UPTO_BIN_FILE_VERSION: Tag = qword(0xD);
pub const TAG_FLAG_MASK_FUSION: Tag = qword(0xE);
pub const TAG_FLAG_PROCESSPARAM: Tag = qword(0xF);
pub const TAG_FLAG_LUA: Tag = qword(0x10);
pub const TAG_FLAG_INSTALL: Tag = qword(0x11);

// STRINGREF
pub const TAG_NAME: Tag = stringref(0x1);
pub const TAG_DESCRIPTION: Tag = stringref(0x2);
pub const TAG_MODULE: Tag = stringref(0x3);
pub const TAG_API: Tag = stringref(0x4);
pub const TAG_VENDOR: Tag = stringref(0x5);
pub const TAG_APP_NAME: Tag = stringref(0x6);
pub const TAG_COMMAND_LINE: Tag = stringref(0x8);
pub const TAG_COMPANY_NAME: Tag = stringref(0x9);
pub const TAG_DLLFILE: Tag = stringref(0xA);
pub const TAG_WILDCARD_NAME: Tag = stringref(0xB);
pub const TAG_PRODUCT_NAME: Tag = stringref(0x10);
pub const TAG_PRODUCT_VERSION: Tag = stringref(0x11);
pub const TAG_FILE_DESCRIPTION: Tag = stringref(0x12);
pub const TAG_FILE_VERSION: Tag = stringref(0x13);
pub const TAG_ORIGINAL_FILENAME: Tag = stringref(0x14);
pub const TAG_INTERNAL_NAME: Tag = stringref(0x15);
pub const TAG_LEGAL_COPYRIGHT: Tag = stringref(0x16);
pub const TAG_APPHELP_DETAILS: Tag = stringref(0x18);
pub const TAG_LINK_URL: Tag = stringref(0x19);
pub const TAG_LINK_TEXT: Tag = stringref(0x1A);
pub const TAG_APPHELP_TITLE: Tag = stringref(0x1B);
pub const TAG_APPHELP_CONTACT: Tag = stringref(0x1C);
pub const TAG_SXS_MANIFEST: Tag = stringref(0x1D);
pub const TAG_DATA_STRING: Tag = stringref(0x1E);
pub const TAG_MSI_TRANSFORM_FILE: Tag = stringref(0x1F);
pub const TAG_LAYER_DISPLAYNAME: Tag = stringref(0x21);
pub const TAG_COMPILER_VERSION: Tag = stringref(0x22);
pub const TAG_ACTION_TYPE: Tag = stringref(0x23);
pub const TAG_EXPORT_NAME: Tag = stringref(0x24);

// LIST
pub const TAG_DATABASE: Tag = list(0x1);
pub const TAG_LIBRARY: Tag = list(0x2);
pub const TAG_INEXCLUDE: Tag = list(0x3);
pub const TAG_SHIM: Tag = list(0x4);
pub const TAG_PATCH: Tag = list(0x5);
pub const TAG_APP: Tag = list(0x6);
pub const TAG_EXE: Tag = list(0x7);
pub const TAG_MATCHING_FILE: Tag = list(0x8);
pub const TAG_SHIM_REF: Tag = list(0x9);
pub const TAG_PATCH_REF: Tag = list(0xA);
pub const TAG_LAYER: Tag = list(0xB);
pub const TAG_FILE: Tag = list(0xC);
pub const TAG_APPHELP: Tag = list(0xD);
pub const TAG_LINK: Tag = list(0xE);
pub const TAG_DATA: Tag = list(0xF);
pub const TAG_MSI_TRANSFORM: Tag = list(0x10);
pub const TAG_MSI_TRANSFORM_REF: Tag = list(0x11);
pub const TAG_MSI_PACKAGE: Tag = list(0x12);
pub const TAG_FLAG: Tag = list(0x13);
pub const TAG_MSI_CUSTOM_ACTION: Tag = list(0x14);
pub const TAG_FLAG_REF: Tag = list(0x15);
pub const TAG_ACTION: Tag = list(0x16);
pub const TAG_LOOKUP: Tag = list(0x17);
pub const TAG_CONTEXT: Tag = list(0x18);
pub const TAG_CONTEXT_REF: Tag = list(0x19);
pub const TAG_STRINGTABLE: Tag = list(0x801);
pub const TAG_INDEXES: Tag = list(0x802);
pub const TAG_INDEX: Tag = list(0x803);

// STRING
pub const TAG_STRINGTABLE_ITEM: Tag = string(0x801);

// BINARY
pub const TAG_PATCH_BITS: Tag = binary(0x2);
pub const TAG_FILE_BITS: Tag = binary(0x3);
pub const TAG_EXE_ID: Tag = binary(0x4);
pub const TAG_DATA_BITS: Tag = binary(0x5);
pub const TAG_MSI_PACKAGE_ID: Tag = binary(0x6);
pub const TAG_DATABASE_ID: Tag = binary(0x7);
pub const TAG_CONTEXT_PLATFORM_ID: Tag = binary(0x8);
pub const TAG_CONTEXT_BRANCH_ID: Tag = binary(0x9);
pub const TAG_FIX_ID: Tag = binary(0x10);
pub const TAG_APP_ID: Tag = binary(0x11);
pub const TAG_INDEX_BITS: Tag = binary(0x801);
