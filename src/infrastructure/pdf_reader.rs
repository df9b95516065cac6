//! PDF 文本提取 - 基础设施层
//!
//! 只负责把上传的 PDF 字节流变成一段文本，不认识题目

use crate::error::{AppResult, ExtractionError};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// 一个上传的文档
#[derive(Debug, Clone)]
pub struct PdfUpload {
    /// 文件名（用于日志和错误信息）
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 从磁盘读取一个 PDF 文件
    ///
    /// 只接受 `.pdf` 扩展名（大小写不敏感），其他文件直接拒绝
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let name = path.display().to_string();
        if !is_pdf_path(path) {
            return Err(ExtractionError::NotPdf { name });
        }
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::ReadFailed {
            name: name.clone(),
            source,
        })?;
        Ok(Self { name, bytes })
    }
}

/// 是否为 PDF 类型的路径
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// PDF 文本提取器
///
/// 职责：
/// - 按文档顺序、页码顺序提取文本
/// - 任一文档无法解析时整体失败，不返回部分结果
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 提取所有文档的文本
    ///
    /// 每页文本后追加换行，最后对整体做 trim
    pub fn extract(&self, uploads: &[PdfUpload]) -> AppResult<String> {
        let mut pages = Vec::new();
        for upload in uploads {
            let doc_pages = self.extract_pages(upload)?;
            debug!("{}: 提取了 {} 页", upload.name, doc_pages.len());
            pages.extend(doc_pages);
        }

        Ok(join_pages(pages))
    }

    /// 提取单个文档每一页的文本（按页码升序）
    pub fn extract_pages(&self, upload: &PdfUpload) -> Result<Vec<String>, ExtractionError> {
        let doc = Document::load_mem(&upload.bytes).map_err(|source| ExtractionError::LoadFailed {
            name: upload.name.clone(),
            source,
        })?;

        // get_pages 返回 BTreeMap，天然按页码排序
        doc.get_pages()
            .into_keys()
            .map(|page| {
                doc.extract_text(&[page])
                    .map_err(|source| ExtractionError::PageFailed {
                        name: upload.name.clone(),
                        page,
                        source,
                    })
            })
            .collect()
    }
}

/// 每页文本后加换行并拼接，最后 trim
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// 在内存中构建一个每页一段文字的 PDF
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_join_pages_order_and_trim() {
        let text = join_pages(["  page one", "page two", "page three\n\n"]);
        assert_eq!(text, "page one\npage two\npage three");
    }

    #[test]
    fn test_join_pages_empty() {
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn test_extract_pages_in_page_order() {
        let upload = PdfUpload::new("lecture.pdf", build_pdf(&["Alpha", "Beta"]));
        let pages = TextExtractor::new().extract_pages(&upload).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("Alpha"));
        assert!(pages[1].contains("Beta"));
    }

    #[test]
    fn test_extract_documents_in_upload_order() {
        let uploads = vec![
            PdfUpload::new("d1.pdf", build_pdf(&["First1", "First2"])),
            PdfUpload::new("d2.pdf", build_pdf(&["Second1"])),
        ];
        let text = TextExtractor::new().extract(&uploads).unwrap();

        let positions: Vec<usize> = ["First1", "First2", "Second1"]
            .iter()
            .map(|needle| text.find(needle).expect("page text present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(text, text.trim());
    }

    #[test]
    fn test_extract_equals_joined_pages_of_all_documents() {
        let extractor = TextExtractor::new();
        let d1 = PdfUpload::new("d1.pdf", build_pdf(&["Chlorophyll", "Stomata"]));
        let d2 = PdfUpload::new("d2.pdf", build_pdf(&["Glucose"]));

        let mut pages = extractor.extract_pages(&d1).unwrap();
        pages.extend(extractor.extract_pages(&d2).unwrap());
        assert_eq!(pages.len(), 3);

        let text = extractor.extract(&[d1, d2]).unwrap();
        assert_eq!(text, join_pages(pages));
    }

    #[test]
    fn test_garbage_bytes_fail_whole_extraction() {
        let uploads = vec![
            PdfUpload::new("ok.pdf", build_pdf(&["fine"])),
            PdfUpload::new("broken.pdf", b"definitely not a pdf".to_vec()),
        ];
        let err = TextExtractor::new().extract(&uploads).unwrap_err();
        match err {
            crate::AppError::Extraction(ExtractionError::LoadFailed { name, .. }) => {
                assert_eq!(name, "broken.pdf");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_path_rejects_non_pdf() {
        let err = PdfUpload::from_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::NotPdf { .. }));
    }

    #[test]
    fn test_is_pdf_path_case_insensitive() {
        assert!(is_pdf_path(Path::new("Lecture.PDF")));
        assert!(is_pdf_path(Path::new("dir/notes.pdf")));
        assert!(!is_pdf_path(Path::new("notes.pdf.txt")));
        assert!(!is_pdf_path(Path::new("pdf")));
    }
}
