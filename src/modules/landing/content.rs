//! Marketing copy for the landing page.

use serde::Serialize;

use crate::modules::booking::models::{self, SelectOption, ServiceType};

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffer {
    pub title: &'static str,
    /// Price in New Taiwan dollars.
    pub price_twd: u32,
    pub highlights: Vec<&'static str>,
    /// The booking option that covers this offer.
    pub service_type: ServiceType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessStep {
    pub step: u8,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqEntry {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub brand: &'static str,
    pub slogan: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub opening_hours: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSection {
    pub title: &'static str,
    pub description: &'static str,
    pub pet_types: Vec<SelectOption>,
    pub service_types: Vec<SelectOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub hero: Hero,
    pub about: Vec<Feature>,
    pub services: Vec<ServiceOffer>,
    pub process: Vec<ProcessStep>,
    pub testimonials: Vec<Testimonial>,
    pub faq: Vec<FaqEntry>,
    pub booking: BookingSection,
    pub contact: Contact,
}

pub fn landing_page() -> LandingPage {
    LandingPage {
        hero: hero(),
        about: about(),
        services: services(),
        process: process(),
        testimonials: testimonials(),
        faq: faq(),
        booking: booking_section(),
        contact: contact(),
    }
}

pub fn hero() -> Hero {
    Hero {
        headline: "溫柔美容，讓毛孩每天都開心",
        tagline: "專業寵物美容團隊，使用寵物專用安全產品，針對每隻毛孩客製化美容流程。",
        stats: vec![
            Stat {
                value: "500+",
                label: "隻毛孩已服務",
            },
            Stat {
                value: "4.9 ★",
                label: "Google 評價",
            },
            Stat {
                value: "100%",
                label: "寵物安全產品",
            },
        ],
    }
}

pub fn about() -> Vec<Feature> {
    vec![
        Feature {
            title: "認證美容師",
            description: "具備專業證照與實務經驗，定期進修最新知識，遵守低壓力處理原則。",
        },
        Feature {
            title: "安全產品",
            description: "全程使用寵物專用產品，無矽靈、無刺激性，針對敏感膚質調整。",
        },
        Feature {
            title: "清潔環境",
            description: "獨立分區設計，定時消毒，降低聲音與氣味壓力，讓毛孩放心等待。",
        },
    ]
}

pub fn services() -> Vec<ServiceOffer> {
    vec![
        ServiceOffer {
            title: "小型犬基礎 Spa",
            price_twd: 900,
            highlights: vec!["溫和深層洗澡與吹整", "指甲修剪、清耳、剃腳底毛", "簡易造型修剪"],
            service_type: ServiceType::Basic,
        },
        ServiceOffer {
            title: "貓咪舒壓美容",
            price_twd: 1200,
            highlights: vec!["溫度與水量客製化控制", "專用貓咪吹水與柔軟毛巾", "去毛結與基礎修剪"],
            service_type: ServiceType::Care,
        },
        ServiceOffer {
            title: "全方位造型設計",
            price_twd: 1800,
            highlights: vec!["依犬種與毛質客製剪裁", "全程說明與造型溝通", "可加購保養／護毛課程"],
            service_type: ServiceType::Style,
        },
    ]
}

pub fn process() -> Vec<ProcessStep> {
    [
        ("線上預約", "填寫基本資料與需求，選擇適合的日期與時間。"),
        ("到店諮詢", "美容師了解毛孩個性、皮膚狀況與照顧方式。"),
        ("溫柔美容", "依照討論的流程，完成洗澡、吹整與修剪。"),
        ("開心接送", "確認造型與狀況，給予居家照顧建議。"),
    ]
    .into_iter()
    .zip(1u8..)
    .map(|((title, description), step)| ProcessStep {
        step,
        title,
        description,
    })
    .collect()
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            name: "球球・柯基",
            content: "以前洗澡都很抗拒，來這邊幾次之後，看到美容師反而會自己搖尾巴走過去。",
        },
        Testimonial {
            name: "Momo・米克斯",
            content: "店內很乾淨也沒有太重的味道，工作人員都會主動回報狀況，讓人很安心。",
        },
        Testimonial {
            name: "布丁・英短貓",
            content: "貓咪本身很緊張，但美容師動作很溫柔，回家後毛很蓬鬆也沒有打結。",
        },
    ]
}

pub fn faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            id: "before-visit",
            question: "帶毛孩來之前需要做什麼準備？",
            answer: "建議先讓毛孩上廁所，並準備平常使用的牽繩或外出籠。若毛孩有特殊狀況，請提前告知美容師。",
        },
        FaqEntry {
            id: "time",
            question: "一次美容大概要花多久時間？",
            answer: "小型犬基礎美容約 1.5 小時，貓咪或完整造型約 2–3 小時，如有排隊可能會再稍微增加。",
        },
        FaqEntry {
            id: "vaccines",
            question: "是否需要完成疫苗或除蟲才可以預約？",
            answer: "為了保護其他毛孩與環境安全，我們建議毛孩至少完成基礎疫苗與體外除蟲，如未完成也請事先告知。",
        },
        FaqEntry {
            id: "cancel",
            question: "臨時有事想改期或取消該怎麼辦？",
            answer: "可以直接透過電話或社群私訊與我們聯繫，若需取消請盡量提前一天告知。",
        },
    ]
}

pub fn booking_section() -> BookingSection {
    BookingSection {
        title: "線上預約",
        description: "填寫以下表單，我們會在營業時間內與你聯繫確認預約。",
        pet_types: models::pet_options(),
        service_types: models::service_options(),
    }
}

pub fn contact() -> Contact {
    Contact {
        brand: "Fluffy Spa",
        slogan: "專業寵物美容，溫柔呵護每一隻毛孩。",
        address: "台北市信義區某某路 88 號 1 樓",
        phone: "02-1234-5678",
        opening_hours: "週二至週日 11:00–20:00",
    }
}
