//! # DOM 构建函数
//!
//! 将纯数据（用户、帖子、评论）映射为尚未挂载的 DOM 节点或文档片段：
//! - `create_element_with_text` - 通用的"带文本元素"
//! - `create_select_options` - 用户选择器的 `<option>` 列表
//! - `create_comments` / `create_comment_section` - 评论片段与评论区
//! - `load_post_cards` / `create_posts` - 帖子卡片（先加载作者和评论，再组装片段）
//!
//! ## 返回值约定
//! 输入缺失（`None`）时返回 `None`，与"输入存在但为空"严格区分。
//! `create_posts` 额外把空帖子列表也视为 `None`，由编排器改为显示占位文本。
//!
//! ## 两阶段构建
//! 帖子卡片依赖网络数据（作者、评论），拆成异步加载 `load_post_cards`
//! 与同步组装 `create_posts` 两步：加载阶段不持有文档，
//! 编排器可以在组装之前丢弃过期的渲染结果。

use futures_util::future::{join, join_all};

use crate::dom::Dom;
use crate::models::comment::Comment;
use crate::models::post::Post;
use crate::models::user::User;
use crate::services::api::{ApiClient, Transport};

/// 按钮和评论区上携带帖子 ID 的属性名
pub const POST_ID_ATTR: &str = "data-post-id";

/// 隐藏评论区使用的 class
pub const HIDE_CLASS: &str = "hide";

/// 评论区的 class
pub const COMMENTS_CLASS: &str = "comments";

/// 占位文本段落的 class
pub const DEFAULT_TEXT_CLASS: &str = "default-text";

/// 评论区折叠时的按钮文本
pub const SHOW_COMMENTS_LABEL: &str = "Show Comments";

/// 评论区展开时的按钮文本
pub const HIDE_COMMENTS_LABEL: &str = "Hide Comments";

/// `create_element_with_text` 未指定标签时使用的默认标签
pub const DEFAULT_TAG: &str = "p";

/// 一篇帖子及其渲染所需的全部网络数据
///
/// 作者或评论请求失败时对应字段为 `None`。
#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub post: Post,
    pub author: Option<User>,
    pub comments: Option<Vec<Comment>>,
}

/// 创建一个带文本内容的元素
///
/// # 参数
/// - `tag` - 标签名，`None` 时使用 `<p>`
/// - `text` - 文本内容
/// - `class` - 可选的单个 class
pub fn create_element_with_text<D: Dom>(
    dom: &mut D,
    tag: Option<&str>,
    text: &str,
    class: Option<&str>,
) -> D::Node {
    let element = dom.create_element(tag.unwrap_or(DEFAULT_TAG));
    dom.set_text(&element, text);
    if let Some(class) = class {
        dom.add_class(&element, class);
    }
    element
}

/// 为每个用户创建一个 `<option>`（value 为用户 ID，文本为用户名）
///
/// # 返回值
/// - `None` - 未传入用户列表
/// - `Some(options)` - 与用户一一对应的选项（空列表得到空 Vec）
pub fn create_select_options<D: Dom>(dom: &mut D, users: Option<&[User]>) -> Option<Vec<D::Node>> {
    let users = users?;
    let options = users
        .iter()
        .map(|user| {
            let option = create_element_with_text(dom, Some("option"), &user.name, None);
            dom.set_attribute(&option, "value", &user.id.to_string());
            option
        })
        .collect();
    Some(options)
}

/// 创建评论片段：每条评论一个 `<article>`，依次包含
/// `<h3>` 评论标题、`<p>` 正文、`<p>` "From: {email}"
///
/// 未传入评论列表时返回 `None`。
pub fn create_comments<D: Dom>(dom: &mut D, comments: Option<&[Comment]>) -> Option<D::Node> {
    let comments = comments?;
    let fragment = dom.create_fragment();
    for comment in comments {
        let article = dom.create_element("article");
        let name = create_element_with_text(dom, Some("h3"), &comment.name, None);
        let body = create_element_with_text(dom, Some("p"), &comment.body, None);
        let from = create_element_with_text(dom, Some("p"), &format!("From: {}", comment.email), None);
        dom.append_child(&article, &name);
        dom.append_child(&article, &body);
        dom.append_child(&article, &from);
        dom.append_child(&fragment, &article);
    }
    Some(fragment)
}

/// 创建某篇帖子的评论区
///
/// 结构为 `<section class="comments hide" data-post-id="{id}">`，初始隐藏。
/// 评论加载失败时评论区为空，按钮仍可切换。
pub fn create_comment_section<D: Dom>(
    dom: &mut D,
    post_id: u64,
    comments: Option<&[Comment]>,
) -> D::Node {
    let section = dom.create_element("section");
    dom.set_attribute(&section, POST_ID_ATTR, &post_id.to_string());
    dom.add_class(&section, COMMENTS_CLASS);
    dom.add_class(&section, HIDE_CLASS);
    if let Some(fragment) = create_comments(dom, comments) {
        dom.append_child(&section, &fragment);
    }
    section
}

/// 为每篇帖子加载作者和评论
///
/// 同一篇帖子的作者请求与评论请求并发进行，两者都完成后才生成卡片；
/// 不同帖子之间也并发进行，结果按帖子原顺序返回。
pub async fn load_post_cards<T: Transport>(api: &ApiClient<T>, posts: &[Post]) -> Vec<PostCard> {
    join_all(posts.iter().map(|post| async move {
        let (author, comments) = join(
            api.get_user(Some(post.user_id)),
            api.get_post_comments(Some(post.id)),
        )
        .await;
        PostCard {
            post: post.clone(),
            author: author.loaded(),
            comments: comments.loaded(),
        }
    }))
    .await
}

/// 组装帖子片段：每张卡片一个 `<article>`
///
/// `<article>` 内依次为：
/// 1. `<h2>` 标题
/// 2. `<p>` 正文
/// 3. `<p>` "Post ID: {id}"
/// 4. `<p>` "Author: {name} with {company}"（作者加载失败时省略）
/// 5. `<p>` 公司标语（作者加载失败时省略）
/// 6. `<button data-post-id="{id}">Show Comments</button>`
/// 7. 初始隐藏的评论区
///
/// # 返回值
/// 卡片列表缺失或为空时返回 `None`
pub fn create_posts<D: Dom>(dom: &mut D, cards: Option<&[PostCard]>) -> Option<D::Node> {
    let cards = cards.filter(|cards| !cards.is_empty())?;
    let fragment = dom.create_fragment();

    for card in cards {
        let post = &card.post;
        let article = dom.create_element("article");

        let mut children = vec![
            create_element_with_text(dom, Some("h2"), &post.title, None),
            create_element_with_text(dom, Some("p"), &post.body, None),
            create_element_with_text(dom, Some("p"), &format!("Post ID: {}", post.id), None),
        ];

        match &card.author {
            Some(author) => {
                let byline = format!("Author: {} with {}", author.name, author.company.name);
                children.push(create_element_with_text(dom, Some("p"), &byline, None));
                children.push(create_element_with_text(
                    dom,
                    Some("p"),
                    &author.company.catch_phrase,
                    None,
                ));
            }
            None => log::warn!("帖子 {} 的作者 {} 未能加载，省略作者信息", post.id, post.user_id),
        }

        let button = create_element_with_text(dom, Some("button"), SHOW_COMMENTS_LABEL, None);
        dom.set_attribute(&button, POST_ID_ATTR, &post.id.to_string());
        children.push(button);

        children.push(create_comment_section(dom, post.id, card.comments.as_deref()));

        for child in &children {
            dom.append_child(&article, child);
        }
        dom.append_child(&fragment, &article);
    }

    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;
    use crate::models::user::Company;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: String::new(),
            email: String::new(),
            company: Company {
                name: format!("{} Inc", name),
                catch_phrase: format!("{} does things", name),
                bs: String::new(),
            },
        }
    }

    fn comment(post_id: u64, name: &str) -> Comment {
        Comment {
            post_id,
            id: 0,
            name: name.to_string(),
            email: format!("{}@example.com", name),
            body: format!("{} says hi", name),
        }
    }

    fn card(id: u64, author: Option<User>, comments: Option<Vec<Comment>>) -> PostCard {
        PostCard {
            post: Post {
                user_id: 1,
                id,
                title: format!("title {}", id),
                body: format!("body {}", id),
            },
            author,
            comments,
        }
    }

    #[test]
    fn test_element_with_text_defaults_to_paragraph() {
        let mut dom = MemoryDom::new();
        let p = create_element_with_text(&mut dom, None, "hello", None);
        assert_eq!(dom.to_html(p), "<p>hello</p>");

        let h = create_element_with_text(&mut dom, Some("h2"), "title", Some("big"));
        assert_eq!(dom.to_html(h), "<h2 class=\"big\">title</h2>");
    }

    #[test]
    fn test_select_options_absent_vs_empty() {
        let mut dom = MemoryDom::new();
        assert_eq!(create_select_options(&mut dom, None), None);
        assert_eq!(create_select_options(&mut dom, Some(&[])), Some(vec![]));
    }

    #[test]
    fn test_select_options_value_and_label() {
        let mut dom = MemoryDom::new();
        let users = vec![user(1, "Leanne"), user(2, "Ervin")];
        let options = create_select_options(&mut dom, Some(&users)).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(dom.to_html(options[1]), "<option value=\"2\">Ervin</option>");
    }

    #[test]
    fn test_comments_fragment() {
        let mut dom = MemoryDom::new();
        assert_eq!(create_comments(&mut dom, None), None);

        let comments = vec![comment(1, "ann"), comment(1, "bob")];
        let fragment = create_comments(&mut dom, Some(&comments)).unwrap();
        assert_eq!(
            dom.to_html(fragment),
            "<article><h3>ann</h3><p>ann says hi</p><p>From: ann@example.com</p></article>\
             <article><h3>bob</h3><p>bob says hi</p><p>From: bob@example.com</p></article>"
        );
    }

    #[test]
    fn test_comment_section_starts_hidden() {
        let mut dom = MemoryDom::new();
        let section = create_comment_section(&mut dom, 7, Some(&[comment(7, "ann")]));
        assert!(dom.has_class(&section, HIDE_CLASS));
        assert!(dom.has_class(&section, COMMENTS_CLASS));
        assert_eq!(dom.attribute(&section, POST_ID_ATTR).as_deref(), Some("7"));
        assert_eq!(dom.children(section).len(), 1);

        let empty = create_comment_section(&mut dom, 8, None);
        assert!(dom.children(empty).is_empty());
    }

    #[test]
    fn test_create_posts_absent_or_empty() {
        let mut dom = MemoryDom::new();
        assert_eq!(create_posts(&mut dom, None), None);
        assert_eq!(create_posts(&mut dom, Some(&[])), None);
    }

    #[test]
    fn test_create_posts_article_layout() {
        let mut dom = MemoryDom::new();
        let cards = vec![card(3, Some(user(1, "Leanne")), Some(vec![comment(3, "ann")]))];
        let fragment = create_posts(&mut dom, Some(&cards)).unwrap();

        let articles = dom.children(fragment).to_vec();
        assert_eq!(articles.len(), 1);

        let parts: Vec<String> = dom
            .children(articles[0])
            .iter()
            .map(|child| dom.text_content(child))
            .collect();
        assert_eq!(
            parts,
            vec![
                "title 3",
                "body 3",
                "Post ID: 3",
                "Author: Leanne with Leanne Inc",
                "Leanne does things",
                "Show Comments",
                "annann says hiFrom: ann@example.com",
            ]
        );

        let button = dom.children(articles[0])[5];
        assert_eq!(dom.tag_name(button), Some("button"));
        assert_eq!(dom.attribute(&button, POST_ID_ATTR).as_deref(), Some("3"));
    }

    #[test]
    fn test_create_posts_without_author() {
        let mut dom = MemoryDom::new();
        let cards = vec![card(4, None, None)];
        let fragment = create_posts(&mut dom, Some(&cards)).unwrap();
        let article = dom.children(fragment)[0];
        // 标题、正文、Post ID、按钮、评论区
        assert_eq!(dom.children(article).len(), 5);
        assert!(!dom.text_content(&article).contains("Author:"));
    }
}
