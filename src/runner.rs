use thiserror::Error;

use crate::api::{
    ApiError, CatalogClient, ClientConfig, Department, IdSet, ObjectRecord, DEFAULT_API_BASE,
};
use crate::catalog;

#[derive(Clone, Debug)]
pub struct Options {
    pub api_base: String,
    pub items_per_page: usize,
    pub timeout_seconds: u64,
    pub rate: u32,
    pub prefilter_images: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            items_per_page: 9,
            timeout_seconds: 10,
            rate: 50,
            prefilter_images: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("items_per_page must be a positive integer")]
    InvalidItemsPerPage,

    #[error("invalid API base URL: {url}")]
    InvalidApiBase { url: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch department list: {source}")]
    Departments {
        #[source]
        source: ApiError,
    },

    #[error("failed to fetch object ids for department {department_id}: {source}")]
    IdSource {
        department_id: u32,
        #[source]
        source: ApiError,
    },

    #[error("failed to fetch object {object_id}: {source}")]
    ObjectFetch {
        object_id: u64,
        #[source]
        source: ApiError,
    },

    #[error("page {page} is out of range (1-{total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },
}

/// One loaded page of a department plus its pagination bounds; what the
/// rendering surface consumes.
#[derive(Clone, Debug)]
pub struct DepartmentPage {
    pub department_id: u32,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_objects: usize,
    pub records: Vec<ObjectRecord>,
}

pub struct Gallery {
    client: CatalogClient,
    options: Options,
}

impl Gallery {
    pub fn new(options: Options) -> Result<Self, GalleryError> {
        if options.items_per_page == 0 {
            return Err(GalleryError::InvalidItemsPerPage);
        }
        if reqwest::Url::parse(&options.api_base).is_err() {
            return Err(GalleryError::InvalidApiBase {
                url: options.api_base.clone(),
            });
        }
        let client = CatalogClient::new(&ClientConfig {
            api_base: options.api_base.clone(),
            timeout_seconds: options.timeout_seconds,
            rate: options.rate,
        })
        .map_err(|e| GalleryError::HttpClientBuild { source: e })?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub async fn departments(&self) -> Result<Vec<Department>, GalleryError> {
        self.client
            .departments()
            .await
            .map_err(|e| GalleryError::Departments { source: e })
    }

    /// Fetches the department's id set. This failing is fatal to the whole
    /// view: with no ids there is nothing to show.
    pub async fn object_ids(&self, department_id: u32) -> Result<IdSet, GalleryError> {
        let result = if self.options.prefilter_images {
            self.client.search_object_ids(department_id).await
        } else {
            self.client.object_ids(department_id).await
        };
        result.map_err(|e| GalleryError::IdSource {
            department_id,
            source: e,
        })
    }

    /// Loads one page of a department. Individual object fetches that fail
    /// inside the page load are dropped, not surfaced; a short or empty
    /// record list is a valid outcome once the ids are exhausted.
    pub async fn department_page(
        &self,
        department_id: u32,
        page: usize,
    ) -> Result<DepartmentPage, GalleryError> {
        let id_set = self.object_ids(department_id).await?;
        let total_pages = catalog::page_count(id_set.ids.len(), self.options.items_per_page);
        if page == 0 || page > total_pages {
            return Err(GalleryError::PageOutOfRange { page, total_pages });
        }
        let records = catalog::load_page(
            &id_set.ids,
            page,
            self.options.items_per_page,
            |id| self.client.object(id),
        )
        .await;
        Ok(DepartmentPage {
            department_id,
            current_page: page,
            total_pages,
            total_objects: id_set.total,
            records,
        })
    }

    pub async fn object(&self, object_id: u64) -> Result<ObjectRecord, GalleryError> {
        self.client
            .object(object_id)
            .await
            .map_err(|e| GalleryError::ObjectFetch { object_id, source: e })
    }
}
