// src/views/columns.rs

use rust_decimal::Decimal;

use crate::{
    common::format::Formatter,
    models::{
        bpmn::BpmnDocument,
        instruction::ArchivedInstruction,
        movement::Movement,
        returned::{self, Destination, ReturnedItem},
        tco::CostOfOwnership,
        toner::{Toner, TonerSummary},
        unit::Unit,
        warranty::Warranty,
        Record,
    },
};

/// Texto exibido numa célula. Recebe o buffer de edição quando a linha está em edição.
pub type Render<R> = fn(&R, Option<&<R as Record>::Edit>, &Formatter) -> String;

/// Coluna da tabela. Com `field`, a célula vira um input na linha em edição.
pub struct Column<R: Record> {
    pub title: &'static str,
    pub field: Option<&'static str>,
    pub render: Render<R>,
}

pub trait Tabular: Record {
    fn columns() -> Vec<Column<Self>>;

    fn shown(title: &'static str, render: Render<Self>) -> Column<Self> {
        Column { title, field: None, render }
    }

    fn editable(title: &'static str, field: &'static str, render: Render<Self>) -> Column<Self> {
        Column { title, field: Some(field), render }
    }
}

const MISSING: &str = "-";

fn toner_text(toner: Option<&TonerSummary>, f: impl FnOnce(&TonerSummary) -> String) -> String {
    toner.map(f).unwrap_or_else(|| MISSING.to_string())
}

fn optional(value: Option<Decimal>, f: impl FnOnce(Decimal) -> String) -> String {
    value.map(f).unwrap_or_else(|| MISSING.to_string())
}

fn grams(fmt: &Formatter, value: Decimal) -> String {
    format!("{}g", fmt.number(value))
}

impl Tabular for Toner {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::editable("Modelo", "modelo", |t, _, _| t.modelo.clone()),
            Self::editable("Peso Cheio", "peso_cheio", |t, _, f| grams(f, t.peso_cheio)),
            Self::editable("Peso Vazio", "peso_vazio", |t, _, f| grams(f, t.peso_vazio)),
            Self::shown("Gramatura", |t, _, f| grams(f, t.gramatura())),
            Self::editable("Impressoras", "impressoras_compativeis", |t, _, _| t.impressoras_compativeis.clone()),
            Self::editable("Cor", "cor", |t, _, _| t.cor.to_string()),
            Self::editable("Área ISO", "area_impressa_iso", |t, _, f| f.percent(t.area_impressa_iso)),
            Self::editable("Capacidade", "capacidade_folhas", |t, _, _| t.capacidade_folhas.to_string()),
            Self::editable("Tipo", "tipo", |t, _, _| t.tipo.to_string()),
            Self::editable("Preço/Folha", "preco_folha", |t, _, f| f.currency(t.preco_folha)),
            Self::shown("Data", |t, _, f| f.date_time(&t.created_at)),
        ]
    }
}

impl Tabular for Unit {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::editable("Unidade", "unidade", |u, _, _| u.unidade.clone()),
            Self::shown("Data", |u, _, f| f.date_time(&u.created_at)),
        ]
    }
}

impl Tabular for ReturnedItem {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::editable("ID Cliente", "id_cliente", |r, _, _| r.id_cliente.to_string()),
            Self::shown("Modelo", |r, _, _| toner_text(r.toner.as_ref(), |t| t.modelo.clone())),
            Self::shown("Peso Cheio (g)", |r, _, f| toner_text(r.toner.as_ref(), |t| f.number(t.peso_cheio))),
            Self::shown("Impressoras", |r, _, _| {
                toner_text(r.toner.as_ref(), |t| t.impressoras_compativeis.clone())
            }),
            Self::shown("Cor", |r, _, _| toner_text(r.toner.as_ref(), |t| t.cor.to_string())),
            Self::shown("Área ISO", |r, _, f| toner_text(r.toner.as_ref(), |t| f.percent(t.area_impressa_iso))),
            Self::shown("Capacidade", |r, _, _| {
                toner_text(r.toner.as_ref(), |t| t.capacidade_folhas.to_string())
            }),
            Self::shown("Tipo", |r, _, _| toner_text(r.toner.as_ref(), |t| t.tipo.to_string())),
            Self::editable("Peso Retornado", "peso_retornado", |r, _, f| grams(f, r.peso_retornado)),
            Self::shown("Unidade", |r, _, _| {
                r.unidade.as_ref().map(|u| u.unidade.clone()).unwrap_or_else(|| MISSING.to_string())
            }),
            Self::editable("Destino", "destino_final", |r, _, _| r.destino_final.to_string()),
            Self::shown("Valor Recuperado", |r, buffer, f| {
                // na edição o destino do buffer comanda a prévia
                let destination = buffer.map(|b| b.destino_final).unwrap_or(r.destino_final);
                if destination == Destination::Estoque {
                    f.currency(returned::recovered_value(destination, r.toner.as_ref()))
                } else {
                    MISSING.to_string()
                }
            }),
            Self::shown("Data", |r, _, f| f.date_time(&r.created_at)),
        ]
    }
}

impl Tabular for Movement {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::shown("Data", |m, _, f| f.date_time(&m.created_at)),
            Self::shown("Toner", |m, _, _| toner_text(m.toner.as_ref(), |t| t.modelo.clone())),
            Self::shown("Unidade", |m, _, _| {
                m.unidade.as_ref().map(|u| u.unidade.clone()).unwrap_or_else(|| MISSING.to_string())
            }),
            Self::editable("Tipo", "tipo", |m, _, _| m.tipo.to_string()),
            Self::editable("Quantidade", "quantidade", |m, _, _| m.quantidade.to_string()),
            Self::editable("Observação", "observacao", |m, _, _| m.observacao.clone().unwrap_or_default()),
        ]
    }
}

impl Tabular for Warranty {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::shown("Data", |w, _, f| f.date_time(&w.created_at)),
            Self::shown("Toner", |w, _, _| toner_text(w.toner.as_ref(), |t| t.modelo.clone())),
            Self::editable("Fornecedor", "fornecedor", |w, _, _| w.fornecedor.clone()),
            Self::editable("Nota Fiscal", "nota_fiscal", |w, _, _| w.nota_fiscal.clone()),
            Self::editable("Quantidade", "quantidade", |w, _, _| w.quantidade.to_string()),
            Self::editable("Status", "status", |w, _, _| w.status.to_string()),
            Self::editable("Observação", "observacao", |w, _, _| w.observacao.clone().unwrap_or_default()),
        ]
    }
}

impl Tabular for BpmnDocument {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::editable("Título", "titulo", |b, _, _| b.titulo.clone()),
            Self::editable("Setor", "setor", |b, _, _| b.setor.clone()),
            Self::editable("Versão", "versao", |b, _, _| b.versao.to_string()),
            Self::editable("Link", "link", |b, _, _| b.link.clone()),
            Self::shown("Data", |b, _, f| f.date_time(&b.created_at)),
        ]
    }
}

impl Tabular for ArchivedInstruction {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::editable("Código", "codigo", |i, _, _| i.codigo.clone()),
            Self::editable("Título", "titulo", |i, _, _| i.titulo.clone()),
            Self::editable("Setor", "setor", |i, _, _| i.setor.clone()),
            Self::editable("Revisão", "revisao", |i, _, _| i.revisao.to_string()),
            Self::editable("Motivo", "motivo", |i, _, _| i.motivo.clone()),
            Self::shown("Arquivada em", |i, _, f| f.date_time(&i.created_at)),
        ]
    }
}

impl Tabular for CostOfOwnership {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Self::shown("Toner", |c, _, _| toner_text(c.toner.as_ref(), |t| t.modelo.clone())),
            Self::editable("Aquisição", "custo_aquisicao", |c, _, f| f.currency(c.custo_aquisicao)),
            Self::editable("Manutenção", "custo_manutencao", |c, _, f| f.currency(c.custo_manutencao)),
            Self::editable("Operacional", "custo_operacional", |c, _, f| f.currency(c.custo_operacional)),
            Self::editable("Período (meses)", "periodo_meses", |c, _, _| c.periodo_meses.to_string()),
            Self::shown("Total", |c, _, f| f.currency(c.total())),
            Self::shown("Custo Mensal", |c, _, f| optional(c.monthly(), |v| f.currency(v))),
            Self::shown("Custo por Folha", |c, _, f| optional(c.per_page(), |v| f.currency(v))),
            Self::shown("Data", |c, _, f| f.date_time(&c.created_at)),
        ]
    }
}
