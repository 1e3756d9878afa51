use serde::Deserialize;

use crate::domain::Paging;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WirePaging {
    #[serde(default)]
    pub(crate) page_size: u32,
    #[serde(default)]
    pub(crate) current_page: u32,
    #[serde(default)]
    pub(crate) total_results: u64,
    #[serde(default)]
    pub(crate) total_page_count: u32,
}

pub(crate) fn paging_from_wire(wire: WirePaging) -> Paging {
    Paging {
        page_size: wire.page_size,
        current_page: wire.current_page,
        total_results: wire.total_results,
        total_page_count: wire.total_page_count,
    }
}
