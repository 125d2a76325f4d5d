//! Answering-state triage.

use crate::domain::models::{AnsweringType, Comment, Issue, DEFAULT_BOT_LOGIN};

/// Service deciding whether an issue still awaits a reply from the
/// organization
///
/// Comments written by one of the configured bot logins are invisible:
/// they neither count as a reply nor end a scan.
#[derive(Debug, Clone)]
pub struct AnsweringClassifier {
    bot_logins: Vec<String>,
}

impl Default for AnsweringClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsweringClassifier {
    /// Create a classifier ignoring the default issue-bounty bot
    pub fn new() -> Self {
        Self::with_bot_logins(vec![DEFAULT_BOT_LOGIN.to_string()])
    }

    /// Create a classifier ignoring the given bot logins
    pub fn with_bot_logins(bot_logins: Vec<String>) -> Self {
        Self { bot_logins }
    }

    fn is_bot(&self, comment: &Comment) -> bool {
        self.bot_logins
            .iter()
            .any(|login| *login == comment.author_login)
    }

    /// Classify one issue
    ///
    /// Member-reported issues walk back from the newest comment until the
    /// first outsider comment. If there is none the issue is still
    /// [`AnsweringType::Ours`]; otherwise the newest comment decides.
    /// Issues reported by anybody else are decided by the newest comment
    /// alone, and an issue nobody replied to is not answered.
    pub fn classify(&self, issue: &Issue) -> AnsweringType {
        let mut human_comments = issue
            .comments
            .iter()
            .rev()
            .filter(|comment| !self.is_bot(comment));

        if issue.author_association.is_member() {
            let Some(newest) = human_comments.next() else {
                return AnsweringType::Ours;
            };
            let outsider_joined = !newest.author_association.is_member()
                || human_comments.any(|comment| !comment.author_association.is_member());

            if !outsider_joined {
                AnsweringType::Ours
            } else if newest.author_association.is_member() {
                AnsweringType::Answered
            } else {
                AnsweringType::NotAnswered
            }
        } else {
            match human_comments.next() {
                Some(newest) if newest.author_association.is_member() => AnsweringType::Answered,
                Some(_) | None => AnsweringType::NotAnswered,
            }
        }
    }

    /// Split issues into (ours, answered, not answered), keeping input order
    pub fn group_by_answering<'a>(
        &self,
        issues: &'a [Issue],
    ) -> (Vec<&'a Issue>, Vec<&'a Issue>, Vec<&'a Issue>) {
        let mut ours = Vec::new();
        let mut answered = Vec::new();
        let mut not_answered = Vec::new();
        for issue in issues {
            match self.classify(issue) {
                AnsweringType::Ours => ours.push(issue),
                AnsweringType::Answered => answered.push(issue),
                AnsweringType::NotAnswered => not_answered.push(issue),
            }
        }
        (ours, answered, not_answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AuthorAssociation::{self, Collaborator, Member, Owner};

    const NONE: AuthorAssociation = AuthorAssociation::None;

    fn issue(number: u64, author: AuthorAssociation, comments: &[(AuthorAssociation, &str)]) -> Issue {
        Issue {
            title: "title".to_string(),
            url: format!("https://github.com/org/repo/issues/{number}"),
            number,
            author_association: author,
            labels: vec![],
            comments: comments
                .iter()
                .map(|(association, login)| Comment::new(*association, *login))
                .collect(),
        }
    }

    fn classify(author: AuthorAssociation, comments: &[(AuthorAssociation, &str)]) -> AnsweringType {
        AnsweringClassifier::new().classify(&issue(1, author, comments))
    }

    #[test]
    fn test_member_issue_without_comments_is_ours() {
        assert_eq!(classify(Member, &[]), AnsweringType::Ours);
    }

    #[test]
    fn test_member_issue_with_member_comment_is_ours() {
        assert_eq!(classify(Member, &[(Member, "user")]), AnsweringType::Ours);
    }

    #[test]
    fn test_member_issue_with_external_comment_is_not_answered() {
        assert_eq!(classify(Member, &[(NONE, "user")]), AnsweringType::NotAnswered);
    }

    #[test]
    fn test_member_issue_answered_after_external_comment() {
        assert_eq!(
            classify(Member, &[(NONE, "user"), (Member, "user")]),
            AnsweringType::Answered
        );
    }

    #[test]
    fn test_member_issue_external_comment_after_member_reply() {
        assert_eq!(
            classify(Member, &[(Member, "user"), (NONE, "user")]),
            AnsweringType::NotAnswered
        );
    }

    #[test]
    fn test_member_issue_with_only_bot_comment_is_ours() {
        assert_eq!(classify(Member, &[(NONE, "issuehunt-app")]), AnsweringType::Ours);
    }

    #[test]
    fn test_member_issue_bot_comment_does_not_end_scan() {
        assert_eq!(
            classify(Member, &[(NONE, "user"), (Member, "user"), (NONE, "issuehunt-app")]),
            AnsweringType::Answered
        );
        assert_eq!(
            classify(Member, &[(Member, "user"), (NONE, "issuehunt-app"), (Member, "user")]),
            AnsweringType::Ours
        );
    }

    #[test]
    fn test_external_issue_without_comments_is_not_answered() {
        assert_eq!(classify(NONE, &[]), AnsweringType::NotAnswered);
    }

    #[test]
    fn test_external_issue_with_member_comment_is_answered() {
        assert_eq!(classify(NONE, &[(Member, "user")]), AnsweringType::Answered);
    }

    #[test]
    fn test_external_issue_last_comment_decides() {
        assert_eq!(
            classify(NONE, &[(Member, "user"), (NONE, "user")]),
            AnsweringType::NotAnswered
        );
        assert_eq!(
            classify(NONE, &[(NONE, "user"), (Member, "user")]),
            AnsweringType::Answered
        );
    }

    #[test]
    fn test_external_issue_with_only_bot_comments_is_not_answered() {
        assert_eq!(
            classify(NONE, &[(Member, "issuehunt-app"), (Member, "issuehunt-app")]),
            AnsweringType::NotAnswered
        );
    }

    #[test]
    fn test_external_issue_skips_trailing_bot_comments() {
        assert_eq!(
            classify(NONE, &[(Member, "user"), (NONE, "issuehunt-app")]),
            AnsweringType::Answered
        );
    }

    #[test]
    fn test_owner_and_collaborator_are_not_members() {
        assert_eq!(classify(Owner, &[]), AnsweringType::NotAnswered);
        assert_eq!(classify(NONE, &[(Collaborator, "user")]), AnsweringType::NotAnswered);
        assert_eq!(classify(Member, &[(Owner, "user")]), AnsweringType::NotAnswered);
    }

    #[test]
    fn test_unknown_association_falls_through_to_non_member() {
        assert_eq!(
            classify(AuthorAssociation::Unknown, &[(AuthorAssociation::Unknown, "user")]),
            AnsweringType::NotAnswered
        );
    }

    #[test]
    fn test_custom_bot_logins() {
        let classifier = AnsweringClassifier::with_bot_logins(vec!["dependabot".to_string()]);
        let behind_dependabot = issue(1, NONE, &[(Member, "user"), (NONE, "dependabot")]);
        assert_eq!(classifier.classify(&behind_dependabot), AnsweringType::Answered);

        let behind_issuehunt = issue(2, NONE, &[(Member, "user"), (NONE, "issuehunt-app")]);
        assert_eq!(classifier.classify(&behind_issuehunt), AnsweringType::NotAnswered);
    }

    #[test]
    fn test_group_by_answering_empty() {
        let (ours, answered, not_answered) = AnsweringClassifier::new().group_by_answering(&[]);
        assert!(ours.is_empty());
        assert!(answered.is_empty());
        assert!(not_answered.is_empty());
    }

    #[test]
    fn test_group_by_answering_keeps_order() {
        let issues = vec![
            issue(122, Member, &[]),
            issue(123, Member, &[(Member, "user")]),
            issue(124, Member, &[(NONE, "user")]),
            issue(125, Member, &[(NONE, "user"), (Member, "user")]),
            issue(126, NONE, &[(Member, "user")]),
            issue(127, NONE, &[]),
        ];

        let (ours, answered, not_answered) = AnsweringClassifier::new().group_by_answering(&issues);

        let numbers = |group: Vec<&Issue>| group.iter().map(|i| i.number).collect::<Vec<_>>();
        assert_eq!(numbers(ours), vec![122, 123]);
        assert_eq!(numbers(answered), vec![125, 126]);
        assert_eq!(numbers(not_answered), vec![124, 127]);
    }
}
