use crate::api::dto::comments::{CommentPostDto, CommentResponse};
use crate::repos::comment_repo::{CommentRow, NewComment};

/// The author is always the authenticated member, never a body field.
pub fn comment_post_to_new_comment(dto: CommentPostDto, author_id: i64) -> NewComment {
    NewComment {
        owner_id: dto.owner_id,
        author_id,
        content: dto.content.trim().to_string(),
    }
}

pub fn comment_to_response(row: CommentRow) -> CommentResponse {
    CommentResponse {
        comment_id: row.comment_id,
        owner_id: row.owner_id,
        author_id: row.author_id,
        author_name: row.author_name,
        content: row.content,
        created_at: row.created_at,
        modified_at: row.modified_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_comes_from_principal() {
        let dto = CommentPostDto {
            owner_id: 4,
            content: "  nice page  ".into(),
        };

        let comment = comment_post_to_new_comment(dto, 9);

        assert_eq!(comment.owner_id, 4);
        assert_eq!(comment.author_id, 9);
        assert_eq!(comment.content, "nice page");
    }
}
