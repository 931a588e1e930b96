use super::ReviewService;
use crate::types::error::AppError;
use crate::types::stats::Statistics;

impl ReviewService {
    pub async fn get_statistics(&self) -> Result<Statistics, AppError> {
        Ok(Statistics {
            total_prs: self.gateway.count_prs().await?,
            assignments_by_user: self.gateway.count_reviewer_assignments().await?,
        })
    }
}
