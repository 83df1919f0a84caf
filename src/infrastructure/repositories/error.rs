use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_TAG_NAME: &str = "tags_name_key";
const CNT_TAG_SLUG: &str = "tags_slug_key";
const CNT_CATEGORY_NAME: &str = "categories_name_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_COMMENT_ARTICLE: &str = "comments_article_id_fkey";
const CNT_COMMENT_PARENT: &str = "comments_parent_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_TAG_NAME | CNT_TAG_SLUG => {
                        DomainError::Conflict("tag already exists".into())
                    }
                    CNT_CATEGORY_NAME | CNT_CATEGORY_SLUG => {
                        DomainError::Conflict("category already exists".into())
                    }
                    CNT_COMMENT_ARTICLE => DomainError::NotFound("article not found".into()),
                    CNT_COMMENT_PARENT => DomainError::NotFound("parent comment not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    "22001" => {
                        return DomainError::Validation("value too long for column".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
